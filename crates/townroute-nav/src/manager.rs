//! String-keyed facade over the road graph.
//!
//! Accepts town and road names, delegates to [`RoadGraph`] and the
//! shortest-path solver, and returns sorted name lists and formatted routes.

use crate::paths::{self, Route};
use anyhow::Result;
use std::path::Path;
use townroute_core::config::LoaderConfig;
use townroute_core::graph::{Location, RoadGraph};
use townroute_core::loader::{self, LoadReport};

/// Town/road manager owning one road graph.
#[derive(Debug, Clone, Default)]
pub struct RouteManager {
    graph: RoadGraph,
}

impl RouteManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying graph.
    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    /// Add a town. Returns false if it already exists.
    pub fn add_town(&mut self, name: &str) -> bool {
        self.graph.add_vertex(Location::new(name))
    }

    /// Add a one-way road from `from` to `to`. Both towns must already exist.
    pub fn add_road(&mut self, from: &str, to: &str, miles: u32, road: &str) -> bool {
        let source = Location::new(from);
        let destination = Location::new(to);
        if !self.graph.contains_vertex(&source) || !self.graph.contains_vertex(&destination) {
            return false;
        }
        self.graph.add_edge(source, destination, miles, road);
        true
    }

    /// Name of the first road from `from` to `to`.
    pub fn get_road(&self, from: &str, to: &str) -> Option<String> {
        self.graph
            .get_edge(&Location::new(from), &Location::new(to))
            .map(|c| c.label.clone())
    }

    /// Delete the road from `from` to `to`, provided the first such road is named `road`.
    pub fn delete_road_connection(&mut self, from: &str, to: &str, road: &str) -> bool {
        let source = Location::new(from);
        let destination = Location::new(to);
        if !self.graph.contains_vertex(&source) || !self.graph.contains_vertex(&destination) {
            return false;
        }
        let miles = match self.graph.get_edge(&source, &destination) {
            Some(c) if c.label == road => c.weight,
            _ => return false,
        };
        self.graph
            .remove_edge(&source, &destination, miles, road)
            .is_some()
    }

    /// Delete a town and every road touching it.
    pub fn delete_town(&mut self, name: &str) -> bool {
        self.graph.remove_vertex(&Location::new(name))
    }

    pub fn contains_town(&self, name: &str) -> bool {
        self.graph.contains_vertex(&Location::new(name))
    }

    pub fn contains_road_connection(&self, from: &str, to: &str) -> bool {
        self.graph
            .contains_edge(&Location::new(from), &Location::new(to))
    }

    /// Road names, sorted, without duplicates.
    pub fn all_roads(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .graph
            .edge_set()
            .into_iter()
            .map(|c| c.label.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Town names, sorted.
    pub fn all_towns(&self) -> Vec<String> {
        self.graph
            .vertex_set()
            .map(|l| l.name().to_string())
            .collect()
    }

    /// Formatted steps of the shortest route; empty if there is none.
    pub fn get_path(&self, from: &str, to: &str) -> Vec<String> {
        self.route(from, to).lines()
    }

    /// Shortest route between two towns.
    pub fn route(&self, from: &str, to: &str) -> Route {
        paths::shortest_path(&self.graph, &Location::new(from), &Location::new(to))
    }

    /// Every town reachable from `from` with its shortest distance, nearest first.
    pub fn distances_from(&self, from: &str) -> Vec<(String, u64)> {
        paths::shortest_path_tree(&self.graph, &Location::new(from))
            .reachable()
            .into_iter()
            .map(|(l, d)| (l.name().to_string(), d))
            .collect()
    }

    pub fn get_town(&self, name: &str) -> Option<&Location> {
        self.graph.find_location(name)
    }

    /// Load roads from a delimited file. Malformed lines are skipped (or fatal when strict).
    pub fn populate_from_file(&mut self, path: &Path, config: &LoaderConfig) -> Result<LoadReport> {
        let report = loader::load_file(path, config)?;
        self.apply(&report);
        Ok(report)
    }

    /// Load roads from delimited text.
    pub fn populate_from_str(&mut self, text: &str, config: &LoaderConfig) -> Result<LoadReport> {
        let report = loader::parse_records(text, config)?;
        self.apply(&report);
        Ok(report)
    }

    fn apply(&mut self, report: &LoadReport) {
        for record in &report.records {
            self.add_town(&record.from);
            self.add_town(&record.to);
            self.add_road(&record.from, &record.to, record.distance, &record.road);
        }
    }
}
