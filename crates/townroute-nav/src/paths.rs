//! Shortest-path routing over the road graph (Dijkstra).
//!
//! Distances are non-negative road lengths accumulated as `u64`. The frontier
//! is a lazy-deletion min-heap: relaxing a town pushes a fresh entry and stale
//! entries are dropped on pop by the visited check. Towns at equal tentative
//! distance are settled in name order.

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use townroute_core::graph::{Connection, Location, RoadGraph};

/// One leg of a route, formatted as `"<from> via <road> to <to> <miles> mi"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub from: String,
    pub road: String,
    pub to: String,
    pub miles: u32,
}

impl From<&Connection> for PathStep {
    fn from(road: &Connection) -> Self {
        Self {
            from: road.source.name().to_string(),
            road: road.label.clone(),
            to: road.destination.name().to_string(),
            miles: road.weight,
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} via {} to {} {} mi",
            self.from, self.road, self.to, self.miles
        )
    }
}

/// A route between two towns. Empty when the destination is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Route {
    pub steps: Vec<PathStep>,
    pub total_distance: u64,
}

impl Route {
    /// The formatted steps, in travel order.
    pub fn lines(&self) -> Vec<String> {
        self.steps.iter().map(ToString::to_string).collect()
    }

    /// Number of legs.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Single-source distances and predecessor roads.
///
/// A town missing from the table is unreachable (infinite distance).
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: Location,
    distances: HashMap<Location, u64>,
    predecessors: HashMap<Location, Connection>,
}

impl ShortestPathTree {
    fn empty(source: &Location) -> Self {
        Self {
            source: source.clone(),
            distances: HashMap::new(),
            predecessors: HashMap::new(),
        }
    }

    pub fn source(&self) -> &Location {
        &self.source
    }

    /// Shortest distance from the source, or `None` if unreachable.
    pub fn distance(&self, location: &Location) -> Option<u64> {
        self.distances.get(location).copied()
    }

    /// The road used to reach `location` on its shortest route.
    pub fn predecessor(&self, location: &Location) -> Option<&Connection> {
        self.predecessors.get(location)
    }

    /// Reachable towns with their distances, nearest first, ties by name.
    pub fn reachable(&self) -> Vec<(&Location, u64)> {
        let mut out: Vec<(&Location, u64)> =
            self.distances.iter().map(|(loc, &d)| (loc, d)).collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        out
    }

    /// Walk predecessor roads back from `destination` and emit them in travel order.
    pub fn route_to(&self, destination: &Location) -> Route {
        let mut steps = Vec::new();
        let mut total_distance = 0;
        let mut current = destination;

        while let Some(road) = self.predecessors.get(current) {
            total_distance += u64::from(road.weight);
            steps.push(PathStep::from(road));
            current = &road.source;
        }

        steps.reverse();
        Route {
            steps,
            total_distance,
        }
    }
}

/// Shortest route from `source` to `destination`.
///
/// Stops as soon as the destination is settled. Returns an empty route if
/// either town is unknown, the destination is unreachable, or both are the same.
pub fn shortest_path(graph: &RoadGraph, source: &Location, destination: &Location) -> Route {
    let tree = search(graph, source, Some(destination));
    tree.route_to(destination)
}

/// Distances and predecessors from `source` to every reachable town.
pub fn shortest_path_tree(graph: &RoadGraph, source: &Location) -> ShortestPathTree {
    search(graph, source, None)
}

/// Dijkstra from `source`, optionally stopping once `target` is settled.
/// Every call starts from fresh state.
fn search(graph: &RoadGraph, source: &Location, target: Option<&Location>) -> ShortestPathTree {
    let mut tree = ShortestPathTree::empty(source);
    if !graph.contains_vertex(source) {
        return tree;
    }

    let mut visited: HashSet<&Location> = HashSet::new();
    let mut frontier: BinaryHeap<Reverse<(u64, &Location)>> = BinaryHeap::new();
    tree.distances.insert(source.clone(), 0);
    frontier.push(Reverse((0, source)));

    while let Some(Reverse((dist, current))) = frontier.pop() {
        if !visited.insert(current) {
            continue; // stale entry
        }
        if target == Some(current) {
            break;
        }

        for road in graph.neighbors(current) {
            let next = &road.destination;
            if visited.contains(next) {
                continue;
            }
            let candidate = dist + u64::from(road.weight);
            if tree.distances.get(next).is_none_or(|&d| candidate < d) {
                tree.distances.insert(next.clone(), candidate);
                tree.predecessors.insert(next.clone(), road.clone());
                frontier.push(Reverse((candidate, next)));
            }
        }
    }

    tracing::debug!(
        "settled {} of {} location(s) from {}",
        visited.len(),
        graph.vertex_count(),
        source
    );
    tree
}
