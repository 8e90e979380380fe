use crate::graph::*;
use ahash::RandomState;
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// Traversals visiting every vertex reachable from a start vertex exactly once.
///
/// Siblings are visited in the order the underlying graph iterates neighbors.
/// All traversals are lazy. An absent start vertex yields nothing.
pub trait Traversal
where
    Self: QueryableGraph + Sized,
{
    /// Breadth-first traversal.
    fn bft(&self, start: VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new(BftIter::new(self, start))
    }

    /// Depth-first traversal driven by a stack of whole neighbor batches.
    ///
    /// The last neighbor pushed is explored first,
    /// so siblings come out in reverse neighbor order.
    fn dft(&self, start: VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new(DftIter::new(self, start))
    }

    /// Depth-first traversal in recursive pre-order.
    ///
    /// Each unvisited neighbor is descended into as soon as it is met.
    /// The recursion is kept on an explicit stack of neighbor cursors,
    /// so deep graphs do not overflow the call stack.
    fn dft_recursive(&self, start: VertexId) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new(DftRecursiveIter::new(self, start))
    }
}

impl<G: QueryableGraph> Traversal for G {}

struct BftIter<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    visited: HashSet<VertexId, RandomState>,
    to_visit: VecDeque<VertexId>,
}

impl<'a, G> BftIter<'a, G>
where
    G: QueryableGraph,
{
    fn new(graph: &'a G, start: VertexId) -> Self {
        let mut to_visit = VecDeque::new();
        if graph.contains_vertex(&start) {
            to_visit.push_back(start);
        }
        Self {
            graph,
            visited: HashSet::with_hasher(RandomState::new()),
            to_visit,
        }
    }
}

impl<'a, G> Iterator for BftIter<'a, G>
where
    G: QueryableGraph,
{
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.to_visit.pop_front() {
            if !self.visited.insert(u) {
                continue;
            }
            trace!(vertex = ?u, "bft visits");
            let visited = &self.visited;
            self.to_visit
                .extend(self.graph.out_neighbors(&u).filter(|v| !visited.contains(v)));
            return Some(u);
        }
        None
    }
}

struct DftIter<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    visited: HashSet<VertexId, RandomState>,
    to_visit: Vec<VertexId>,
}

impl<'a, G> DftIter<'a, G>
where
    G: QueryableGraph,
{
    fn new(graph: &'a G, start: VertexId) -> Self {
        let mut to_visit = vec![];
        if graph.contains_vertex(&start) {
            to_visit.push(start);
        }
        Self {
            graph,
            visited: HashSet::with_hasher(RandomState::new()),
            to_visit,
        }
    }
}

impl<'a, G> Iterator for DftIter<'a, G>
where
    G: QueryableGraph,
{
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.to_visit.pop() {
            if !self.visited.insert(u) {
                continue;
            }
            trace!(vertex = ?u, "dft visits");
            let visited = &self.visited;
            self.to_visit
                .extend(self.graph.out_neighbors(&u).filter(|v| !visited.contains(v)));
            return Some(u);
        }
        None
    }
}

struct DftRecursiveIter<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    visited: HashSet<VertexId, RandomState>,
    start: Option<VertexId>,
    // one cursor per vertex on the current descent
    frames: Vec<Box<dyn Iterator<Item = VertexId> + 'a>>,
}

impl<'a, G> DftRecursiveIter<'a, G>
where
    G: QueryableGraph,
{
    fn new(graph: &'a G, start: VertexId) -> Self {
        Self {
            graph,
            visited: HashSet::with_hasher(RandomState::new()),
            start: Some(start).filter(|v| graph.contains_vertex(v)),
            frames: vec![],
        }
    }

    fn enter(&mut self, v: VertexId) -> VertexId {
        trace!(vertex = ?v, depth = self.frames.len(), "dft_recursive visits");
        self.visited.insert(v);
        self.frames.push(self.graph.out_neighbors(&v));
        v
    }
}

impl<'a, G> Iterator for DftRecursiveIter<'a, G>
where
    G: QueryableGraph,
{
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            return Some(self.enter(start));
        }
        loop {
            let cursor = self.frames.last_mut()?;
            match cursor.next() {
                Some(v) if !self.visited.contains(&v) => return Some(self.enter(v)),
                Some(_) => {}
                None => {
                    self.frames.pop();
                }
            }
        }
    }
}
