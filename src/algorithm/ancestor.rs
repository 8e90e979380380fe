use crate::{algorithm::PathSearch, graph::*};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Finds the farthest ancestor of `node` in a list of `(parent, child)` pairs.
///
/// An ancestor is any vertex with a path of at least one edge to `node`.
/// For every pair, a depth-first search runs from the parent to `node`
/// and the longest path found wins.
/// Among equally long paths, the one found first wins.
/// Returns `None` if `node` has no ancestor, including when `node` is absent.
///
/// ```rust
/// use graphwalk::algorithm::earliest_ancestor;
///
/// let edges = [(1, 3), (2, 3), (3, 6), (5, 6), (5, 7), (4, 5), (4, 8), (8, 9), (11, 8), (10, 1)];
/// assert_eq!(earliest_ancestor(&edges, &6), Some(10));
/// assert_eq!(earliest_ancestor(&edges, &4), None);
/// ```
pub fn earliest_ancestor<K>(edges: &[(K, K)], node: &K) -> Option<K>
where
    K: Hash + Eq + Clone + Debug,
{
    longest_ancestry(edges, node).and_then(|path| path.into_iter().next())
}

/// Like [earliest_ancestor], but returns the whole winning path,
/// from the ancestor down to `node`.
pub fn longest_ancestry<K>(edges: &[(K, K)], node: &K) -> Option<Vec<K>>
where
    K: Hash + Eq + Clone + Debug,
{
    let graph: DirectedGraph<K> = DirectedGraph::from_edges(edges.iter().cloned());
    let goal = graph.vertex_id(node)?;
    let mut longest: Vec<VertexId> = vec![];
    for (parent, _) in edges {
        let start = match graph.vertex_id(parent) {
            Some(start) => start,
            None => continue,
        };
        if let Some(path) = graph.lower_graph().dfs(start, goal) {
            if path.len() > longest.len() {
                longest = path;
            }
        }
    }
    if longest.len() <= 1 {
        debug!(node = ?node, "no ancestor");
        return None;
    }
    let res: Option<Vec<K>> = longest
        .iter()
        .map(|vid| graph.vertex_key(vid).cloned())
        .collect();
    debug!(node = ?node, ancestry = ?res, "longest ancestry");
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ancestors() -> Vec<(u32, u32)> {
        vec![
            (1, 3),
            (2, 3),
            (3, 6),
            (5, 6),
            (5, 7),
            (4, 5),
            (4, 8),
            (8, 9),
            (11, 8),
            (10, 1),
        ]
    }

    #[test]
    fn roots_have_no_ancestor() {
        let edges = ancestors();
        for root in [2, 4, 10, 11] {
            assert_eq!(earliest_ancestor(&edges, &root), None);
        }
    }

    #[test]
    fn farthest_ancestor_wins() {
        let edges = ancestors();
        assert_eq!(earliest_ancestor(&edges, &5), Some(4));
        assert_eq!(earliest_ancestor(&edges, &6), Some(10));
        assert_eq!(earliest_ancestor(&edges, &3), Some(10));
        assert_eq!(earliest_ancestor(&edges, &7), Some(4));
        assert_eq!(earliest_ancestor(&edges, &1), Some(10));
    }

    #[test]
    fn first_found_wins_ties() {
        let edges = ancestors();
        // 4 -> 8 -> 9 and 11 -> 8 -> 9 are equally long
        assert_eq!(earliest_ancestor(&edges, &9), Some(4));
        assert_eq!(earliest_ancestor(&edges, &8), Some(4));

        let reordered: Vec<_> = edges
            .iter()
            .copied()
            .filter(|(p, _)| *p != 4)
            .chain([(4, 5), (4, 8)])
            .collect();
        assert_eq!(earliest_ancestor(&reordered, &9), Some(11));
    }

    #[test]
    fn whole_ancestry() {
        let edges = ancestors();
        assert_eq!(longest_ancestry(&edges, &6), Some(vec![10, 1, 3, 6]));
        assert_eq!(longest_ancestry(&edges, &4), None);
    }

    #[test]
    fn absent_node_and_empty_list() {
        let edges = ancestors();
        assert_eq!(earliest_ancestor(&edges, &12), None);
        assert_eq!(earliest_ancestor::<u32>(&[], &1), None);
    }

    #[test]
    fn string_keys() {
        let edges = vec![
            ("grandma".to_string(), "mom".to_string()),
            ("mom".to_string(), "me".to_string()),
        ];
        assert_eq!(
            earliest_ancestor(&edges, &"me".to_string()),
            Some("grandma".to_string())
        );
    }
}
