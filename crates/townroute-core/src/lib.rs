//! Core types for the townroute road network.
//!
//! Provides the graph engine ([`graph::RoadGraph`]) over named locations and
//! labeled roads, the delimited road-file loader, and configuration.

pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
