use crate::graph::*;
use ahash::RandomState;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::trace;

/// Searches for a path between two vertices.
///
/// A path is the sequence of vertices from `start` to `goal`, both inclusive.
/// `None` means `goal` is unreachable from `start`,
/// which includes either of them being absent.
/// A vertex always reaches itself by the single-vertex path.
pub trait PathSearch
where
    Self: QueryableGraph + Sized,
{
    /// Breadth-first search. The returned path has the fewest edges.
    fn bfs(&self, start: VertexId, goal: VertexId) -> Option<Vec<VertexId>> {
        if !self.contains_vertex(&start) {
            return None;
        }
        let mut parents = HashMap::with_hasher(RandomState::new());
        let mut visited = HashSet::with_hasher(RandomState::new());
        let mut to_visit = VecDeque::new();
        visited.insert(start);
        to_visit.push_back(start);
        while let Some(u) = to_visit.pop_front() {
            if u == goal {
                return Some(rebuild_path(&parents, goal));
            }
            trace!(vertex = ?u, "bfs expands");
            for v in self.out_neighbors(&u) {
                if visited.insert(v) {
                    parents.insert(v, u);
                    to_visit.push_back(v);
                }
            }
        }
        None
    }

    /// Depth-first search driven by a stack of whole neighbor batches.
    ///
    /// The returned path is the one along which `goal` is first popped,
    /// not necessarily a shortest one.
    fn dfs(&self, start: VertexId, goal: VertexId) -> Option<Vec<VertexId>> {
        if !self.contains_vertex(&start) {
            return None;
        }
        let mut parents = HashMap::with_hasher(RandomState::new());
        let mut visited = HashSet::with_hasher(RandomState::new());
        let mut to_visit = vec![(start, None)];
        while let Some((u, parent)) = to_visit.pop() {
            if !visited.insert(u) {
                continue;
            }
            if let Some(p) = parent {
                parents.insert(u, p);
            }
            if u == goal {
                return Some(rebuild_path(&parents, goal));
            }
            trace!(vertex = ?u, "dfs expands");
            to_visit.extend(
                self.out_neighbors(&u)
                    .filter(|v| !visited.contains(v))
                    .map(|v| (v, Some(u))),
            );
        }
        None
    }

    /// Depth-first search in recursive order with backtracking.
    ///
    /// Neighbors are tried one by one, descending as soon as an unvisited one is met.
    /// The current descent is kept on an explicit stack,
    /// whose vertices form the returned path.
    fn dfs_recursive(&self, start: VertexId, goal: VertexId) -> Option<Vec<VertexId>> {
        if !self.contains_vertex(&start) {
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }
        let mut visited = HashSet::with_hasher(RandomState::new());
        visited.insert(start);
        let mut frames = vec![(start, self.out_neighbors(&start))];
        loop {
            let (_, cursor) = frames.last_mut()?;
            match cursor.next() {
                Some(v) if visited.insert(v) => {
                    if v == goal {
                        let mut path: Vec<_> = frames.iter().map(|(u, _)| *u).collect();
                        path.push(v);
                        return Some(path);
                    }
                    trace!(vertex = ?v, depth = frames.len(), "dfs_recursive descends");
                    frames.push((v, self.out_neighbors(&v)));
                }
                Some(_) => {}
                None => {
                    frames.pop();
                }
            }
        }
    }
}

impl<G: QueryableGraph> PathSearch for G {}

fn rebuild_path(
    parents: &HashMap<VertexId, VertexId, RandomState>,
    goal: VertexId,
) -> Vec<VertexId> {
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(p) = parents.get(&cur) {
        path.push(*p);
        cur = *p;
    }
    path.reverse();
    path
}
