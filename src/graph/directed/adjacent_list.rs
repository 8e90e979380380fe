use crate::graph::*;
use petgraph::{graph::NodeIndex, stable_graph::StableDiGraph, Direction};

/// A directed graph backed by [petgraph]'s stable graph.
///
/// Neighbors come out in the reverse order of edge insertion.
#[derive(Clone)]
pub struct AdjacentListGraph(StableDiGraph<(), (), usize>);

impl Default for AdjacentListGraph {
    fn default() -> Self {
        <Self as GrowableGraph>::new()
    }
}

impl AdjacentListGraph {
    fn neighbors(
        &self,
        v: &VertexId,
        dir: Direction,
    ) -> Box<dyn Iterator<Item = VertexId> + '_> {
        let nidx = NodeIndex::new(v.to_raw());
        if !self.0.contains_node(nidx) {
            return Box::new(std::iter::empty());
        }
        let it = self
            .0
            .neighbors_directed(nidx, dir)
            .map(|x| VertexId::new(x.index()));
        Box::new(it)
    }
}

impl GrowableGraph for AdjacentListGraph {
    fn new() -> Self {
        Self(StableDiGraph::<(), (), usize>::with_capacity(0, 0))
    }

    fn add_vertex(&mut self) -> VertexId {
        let vid = self.0.add_node(());
        VertexId::new(vid.index())
    }

    fn add_edge(&mut self, source: VertexId, sink: VertexId) -> bool {
        let a = NodeIndex::new(source.to_raw());
        let b = NodeIndex::new(sink.to_raw());
        if self.0.find_edge(a, b).is_some() {
            return false;
        }
        self.0.add_edge(a, b, ());
        true
    }
}

impl QueryableGraph for AdjacentListGraph {
    fn vertex_size(&self) -> usize {
        self.0.node_count()
    }

    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        let it = self.0.node_indices().map(|x| VertexId::new(x.index()));
        Box::new(it)
    }

    fn contains_vertex(&self, v: &VertexId) -> bool {
        self.0.contains_node(NodeIndex::new(v.to_raw()))
    }

    fn edge_size(&self) -> usize {
        self.0.edge_count()
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        let it = self.0.edge_indices().filter_map(|x| {
            self.0.edge_endpoints(x).map(|(src, snk)| {
                Edge::new(VertexId::new(src.index()), VertexId::new(snk.index()))
            })
        });
        Box::new(it)
    }

    fn contains_edge(&self, source: &VertexId, sink: &VertexId) -> bool {
        let a = NodeIndex::new(source.to_raw());
        let b = NodeIndex::new(sink.to_raw());
        self.0.contains_node(a) && self.0.find_edge(a, b).is_some()
    }

    fn out_neighbors(&self, v: &VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.neighbors(v, Direction::Outgoing)
    }

    fn in_neighbors(&self, v: &VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.neighbors(v, Direction::Incoming)
    }
}
