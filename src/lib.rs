//! A keyed directed graph with traversals and path searches.
//!
//! Vertices are identified by arbitrary keys which are mapped to lightweight
//! [graph::VertexId]s. Algorithms in [algorithm] work on the low-level ids and are
//! re-exposed on [graph::DirectedGraph] in terms of keys.
pub mod algorithm;
mod error;
pub mod graph;

pub use self::error::*;
