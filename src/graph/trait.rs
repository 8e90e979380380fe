use crate::graph::*;

/// Graphs which vertices and edges can be added into.
///
/// Nothing is ever removed.
pub trait GrowableGraph {
    fn new() -> Self;
    fn add_vertex(&mut self) -> VertexId;
    /// Adds a directed edge and returns whether it was absent before.
    ///
    /// Both endpoints must have been added. Adding an existing edge is a no-op.
    fn add_edge(&mut self, source: VertexId, sink: VertexId) -> bool;
}

pub trait QueryableGraph {
    fn vertex_size(&self) -> usize;
    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_>;
    fn contains_vertex(&self, v: &VertexId) -> bool;

    fn edge_size(&self) -> usize;
    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_>;
    fn contains_edge(&self, source: &VertexId, sink: &VertexId) -> bool;
    /// Sinks of edges leaving `v`. Empty if `v` is absent.
    fn out_neighbors(&self, v: &VertexId) -> Box<dyn Iterator<Item = VertexId> + '_>;
    /// Sources of edges entering `v`. Empty if `v` is absent.
    fn in_neighbors(&self, v: &VertexId) -> Box<dyn Iterator<Item = VertexId> + '_>;

    fn debug(&self) -> GraphDebug<'_, Self>
    where
        Self: Sized,
    {
        GraphDebug::new(self)
    }
}
