//! Graph data model for the road network.
//!
//! Roads are stored directionally in per-town adjacency lists, but compared
//! direction-agnostically: a road A→B and a road B→A with the same distance
//! and name are the same road for removal and deduplication.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A named vertex. The name is the sole identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location {
    name: String,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A directed, weighted, labeled edge between two locations.
///
/// Equality and hashing ignore direction: two connections are equal when
/// they share weight and label and join the same pair of locations in
/// either order. Ordering is by label first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub source: Location,
    pub destination: Location,
    /// Distance in miles.
    pub weight: u32,
    /// Road name.
    pub label: String,
}

impl Connection {
    pub fn new(
        source: Location,
        destination: Location,
        weight: u32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source,
            destination,
            weight,
            label: label.into(),
        }
    }

    /// Endpoints as (smaller, larger) by name, so both directions compare alike.
    fn unordered_endpoints(&self) -> (&Location, &Location) {
        if self.source <= self.destination {
            (&self.source, &self.destination)
        } else {
            (&self.destination, &self.source)
        }
    }

    /// Direction-agnostic road identity. Same as `==`, spelled out for call sites
    /// where the symmetric match is the point.
    pub fn same_road(&self, other: &Connection) -> bool {
        self.weight == other.weight
            && self.label == other.label
            && self.connects(&other.source, &other.destination)
    }

    /// True if this connection joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &Location, b: &Location) -> bool {
        (self.source == *a && self.destination == *b)
            || (self.source == *b && self.destination == *a)
    }

    /// True if `location` is either endpoint.
    pub fn touches(&self, location: &Location) -> bool {
        self.source == *location || self.destination == *location
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.same_road(other)
    }
}

impl Eq for Connection {}

impl Hash for Connection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (lo, hi) = self.unordered_endpoints();
        lo.hash(state);
        hi.hash(state);
        self.weight.hash(state);
        self.label.hash(state);
    }
}

impl PartialOrd for Connection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Connection {
    // Label decides; weight and endpoints only break ties so that Ord agrees with Eq.
    fn cmp(&self, other: &Self) -> Ordering {
        self.label
            .cmp(&other.label)
            .then_with(|| self.weight.cmp(&other.weight))
            .then_with(|| self.unordered_endpoints().cmp(&other.unordered_endpoints()))
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {}, {} mi)",
            self.label, self.source, self.destination, self.weight
        )
    }
}

/// Adjacency-list road graph: each location owns its outgoing connections.
///
/// Vertices iterate in name order; outgoing connections keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    adjacency: BTreeMap<Location, Vec<Connection>>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a location. Returns false if it was already present.
    pub fn add_vertex(&mut self, location: Location) -> bool {
        if self.adjacency.contains_key(&location) {
            return false;
        }
        self.adjacency.insert(location, Vec::new());
        true
    }

    /// Add a directed connection from `source` to `destination`.
    ///
    /// Missing endpoints are inserted first. No reverse connection is created.
    pub fn add_edge(
        &mut self,
        source: Location,
        destination: Location,
        weight: u32,
        label: impl Into<String>,
    ) -> &Connection {
        self.add_vertex(destination.clone());
        let edges = self.adjacency.entry(source.clone()).or_default();
        edges.push(Connection::new(source, destination, weight, label));
        &edges[edges.len() - 1]
    }

    pub fn contains_vertex(&self, location: &Location) -> bool {
        self.adjacency.contains_key(location)
    }

    /// True if `source` has any outgoing connection ending at `destination`.
    pub fn contains_edge(&self, source: &Location, destination: &Location) -> bool {
        self.adjacency
            .get(source)
            .is_some_and(|edges| edges.iter().any(|e| e.destination == *destination))
    }

    /// First connection from `source` whose destination is `destination`.
    pub fn get_edge(&self, source: &Location, destination: &Location) -> Option<&Connection> {
        self.adjacency
            .get(source)?
            .iter()
            .find(|e| e.destination == *destination)
    }

    /// Remove the first connection in `source`'s list matching the given road.
    ///
    /// Matching is direction-agnostic, but only `source`'s list is searched.
    pub fn remove_edge(
        &mut self,
        source: &Location,
        destination: &Location,
        weight: u32,
        label: &str,
    ) -> Option<Connection> {
        let edges = self.adjacency.get_mut(source)?;
        let candidate = Connection::new(source.clone(), destination.clone(), weight, label);
        let pos = edges.iter().position(|e| e.same_road(&candidate))?;
        Some(edges.remove(pos))
    }

    /// Remove a location and every connection that starts or ends at it.
    pub fn remove_vertex(&mut self, location: &Location) -> bool {
        if self.adjacency.remove(location).is_none() {
            return false;
        }
        let mut dropped = 0;
        for edges in self.adjacency.values_mut() {
            let before = edges.len();
            edges.retain(|e| !e.touches(location));
            dropped += before - edges.len();
        }
        tracing::debug!(
            "removed location {} and {} incoming connection(s)",
            location,
            dropped
        );
        true
    }

    /// All connections, deduplicated by road identity. First occurrence wins.
    pub fn edge_set(&self) -> Vec<&Connection> {
        dedup_roads(self.adjacency.values().flatten())
    }

    /// Outgoing connections of `location`, deduplicated. Empty if absent.
    pub fn edges_of(&self, location: &Location) -> Vec<&Connection> {
        match self.adjacency.get(location) {
            Some(edges) => dedup_roads(edges.iter()),
            None => Vec::new(),
        }
    }

    /// Outgoing connections of `location` in insertion order, duplicates included.
    pub fn neighbors(&self, location: &Location) -> &[Connection] {
        match self.adjacency.get(location) {
            Some(edges) => edges,
            None => &[],
        }
    }

    /// Locations in name order.
    pub fn vertex_set(&self) -> impl Iterator<Item = &Location> {
        self.adjacency.keys()
    }

    /// Look up the stored location with the given name.
    pub fn find_location(&self, name: &str) -> Option<&Location> {
        self.adjacency
            .get_key_value(&Location::new(name))
            .map(|(k, _)| k)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of stored connections, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

fn dedup_roads<'a>(edges: impl Iterator<Item = &'a Connection>) -> Vec<&'a Connection> {
    let mut seen: HashSet<&Connection> = HashSet::new();
    edges.filter(|e| seen.insert(*e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(c: &Connection) -> u64 {
        let mut h = DefaultHasher::new();
        c.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_location_identity_is_name() {
        assert_eq!(Location::new("Oakton"), Location::from("Oakton"));
        assert_ne!(Location::new("Oakton"), Location::new("oakton"));
        assert!(Location::new("Aspen") < Location::new("Birch"));
    }

    #[test]
    fn test_connection_symmetric_equality() {
        let ab = Connection::new("A".into(), "B".into(), 5, "Main");
        let ba = Connection::new("B".into(), "A".into(), 5, "Main");
        assert_eq!(ab, ba);
        assert_eq!(hash_of(&ab), hash_of(&ba));
        assert_eq!(ab.cmp(&ba), Ordering::Equal);
    }

    #[test]
    fn test_connection_inequality() {
        let base = Connection::new("A".into(), "B".into(), 5, "Main");
        assert_ne!(base, Connection::new("A".into(), "B".into(), 6, "Main"));
        assert_ne!(base, Connection::new("A".into(), "B".into(), 5, "Oak"));
        assert_ne!(base, Connection::new("A".into(), "C".into(), 5, "Main"));
    }

    #[test]
    fn test_connection_orders_by_label() {
        let oak = Connection::new("A".into(), "B".into(), 1, "Oak");
        let main = Connection::new("Y".into(), "Z".into(), 99, "Main");
        assert!(main < oak);
    }

    #[test]
    fn test_connection_display() {
        let c = Connection::new("A".into(), "B".into(), 5, "Main");
        assert_eq!(c.to_string(), "Main (A -> B, 5 mi)");
    }

    #[test]
    fn test_add_edge_returns_stored_connection() {
        let mut graph = RoadGraph::new();
        let road = graph.add_edge("A".into(), "B".into(), 7, "Elm").clone();
        assert_eq!(road.label, "Elm");
        assert_eq!(graph.neighbors(&"A".into()).len(), 1);
        assert!(graph.neighbors(&"B".into()).is_empty());
    }

    #[test]
    fn test_find_location() {
        let mut graph = RoadGraph::new();
        graph.add_vertex("Aspen".into());
        assert_eq!(graph.find_location("Aspen").map(Location::name), Some("Aspen"));
        assert!(graph.find_location("Birch").is_none());
    }
}
