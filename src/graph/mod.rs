//! Directed graphs keyed by arbitrary values, and the low-level graphs beneath them.
//!
//! # Low-level graphs and `DirectedGraph`
//!
//! Vertices in low-level graphs are lightweight ID's, essentially `usize`.
//! Algorithm authors may feel free to copy and store these ID's.
//! Low-level graphs come in two flavors, [directed::TreeBackedGraph] and [directed::AdjacentListGraph].
//!
//! [DirectedGraph] maps user keys, e.g. integers or strings, onto such ID's
//! and exposes traversals and searches in terms of keys.

mod vertex;
pub use self::vertex::*;
mod edge;
pub use self::edge::*;
mod r#trait;
pub use self::r#trait::*;
mod graph_debug;
pub use self::graph_debug::*;
mod keyed_graph;
pub use self::keyed_graph::*;

pub mod directed;
