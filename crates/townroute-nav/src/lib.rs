//! Routing tools for querying the road network.
//!
//! Provides Dijkstra shortest paths with human-readable route steps, and
//! [`manager::RouteManager`], the town/road facade that accepts plain names.

pub mod manager;
pub mod paths;
