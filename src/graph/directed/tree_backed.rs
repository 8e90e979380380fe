use crate::graph::*;
use std::collections::BTreeSet;

/// A directed graph over ordered sets.
///
/// Neighbors are always iterated in ascending [VertexId] order,
/// i.e. the order in which they were added.
/// Therefore traversals over this graph are deterministic.
///
/// |                    | Complexity                                          |
/// | ------------------ | --------------------------------------------------- |
/// | `add_vertex`       | $O(\log \|V\|)$                                     |
/// | `add_edge`         | $O(\log \|E\|)$                                     |
/// | `vertex_size`      | $O(1)$                                              |
/// | `contains_vertex`  | $O(\log \|V\|)$                                     |
/// | `edge_size`        | $O(1)$                                              |
/// | `contains_edge`    | $O(\log \|E\|)$                                     |
/// | `out_neighbors`    | returns in $O(\log \|E\|)$. amortized $O(1)$ on each call to `.next`. |
/// | `in_neighbors`     | returns in $O(\log \|E\|)$. amortized $O(1)$ on each call to `.next`. |
#[derive(Clone)]
pub struct TreeBackedGraph {
    vid_factory: VertexIdFactory,
    vertices: BTreeSet<VertexId>,
    // (source, sink)
    out_edges: BTreeSet<(VertexId, VertexId)>,
    // (sink, source)
    in_edges: BTreeSet<(VertexId, VertexId)>,
}

impl std::fmt::Debug for TreeBackedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TreeBackedGraph {{")?;
        for v in self.vertices.iter() {
            writeln!(f, "{:?}:", v)?;
            for snk in self.out_neighbors(v) {
                writeln!(f, "  -> {:?}", snk)?;
            }
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl Default for TreeBackedGraph {
    fn default() -> Self {
        <Self as GrowableGraph>::new()
    }
}

impl GrowableGraph for TreeBackedGraph {
    fn new() -> Self {
        Self {
            vid_factory: VertexIdFactory::new(),
            vertices: BTreeSet::new(),
            out_edges: BTreeSet::new(),
            in_edges: BTreeSet::new(),
        }
    }

    fn add_vertex(&mut self) -> VertexId {
        let vid = self.vid_factory.one_more();
        self.vertices.insert(vid);
        vid
    }

    fn add_edge(&mut self, source: VertexId, sink: VertexId) -> bool {
        debug_assert!(self.vertices.contains(&source));
        debug_assert!(self.vertices.contains(&sink));
        if !self.out_edges.insert((source, sink)) {
            return false;
        }
        self.in_edges.insert((sink, source));
        true
    }
}

impl QueryableGraph for TreeBackedGraph {
    fn vertex_size(&self) -> usize {
        self.vertices.len()
    }

    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new(self.vertices.iter().copied())
    }

    fn contains_vertex(&self, v: &VertexId) -> bool {
        self.vertices.contains(v)
    }

    fn edge_size(&self) -> usize {
        self.out_edges.len()
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        Box::new(
            self.out_edges
                .iter()
                .map(|(src, snk)| Edge::new(*src, *snk)),
        )
    }

    fn contains_edge(&self, source: &VertexId, sink: &VertexId) -> bool {
        self.out_edges.contains(&(*source, *sink))
    }

    fn out_neighbors(&self, v: &VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        let start = (*v, VertexId::MIN);
        let end = (*v, VertexId::MAX);
        let it = self.out_edges.range(start..=end).map(|(_, snk)| *snk);
        Box::new(it)
    }

    fn in_neighbors(&self, v: &VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        let start = (*v, VertexId::MIN);
        let end = (*v, VertexId::MAX);
        let it = self.in_edges.range(start..=end).map(|(_, src)| *src);
        Box::new(it)
    }
}
