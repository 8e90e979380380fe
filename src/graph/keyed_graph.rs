use crate::{algorithm::*, graph::*, GraphError, Result};
use ahash::RandomState;
use bimap::BiHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, warn};

/// A directed graph whose vertices are identified by keys of type `K`.
///
/// Keys are mapped to [VertexId]s, and the structure itself lives in a low-level graph `G`.
/// Vertices and edges are only ever added.
/// There are no parallel edges. Self-loops are allowed.
///
/// Traversals and searches follow the neighbor order of `G`.
/// With the default [directed::TreeBackedGraph], neighbors come in the order their vertices were added,
/// so results are reproducible.
///
/// ```rust
/// use graphwalk::graph::DirectedGraph;
///
/// let mut g = DirectedGraph::<&str>::new();
/// g.add_vertex("a");
/// g.add_vertex("b");
/// g.add_vertex("c");
/// g.add_edge(&"a", &"b").unwrap();
/// g.add_edge(&"b", &"c").unwrap();
///
/// assert_eq!(g.bft(&"a").unwrap().collect::<Vec<_>>(), vec![&"a", &"b", &"c"]);
/// assert_eq!(g.bfs(&"a", &"c").unwrap(), Some(vec!["a", "b", "c"]));
/// assert_eq!(g.bfs(&"c", &"a").unwrap(), None);
/// assert!(g.add_edge(&"a", &"z").is_err());
/// ```
#[derive(Clone)]
pub struct DirectedGraph<K, G = directed::TreeBackedGraph>
where
    K: Hash + Eq,
{
    lower_graph: G,
    vertex_keys: BiHashMap<VertexId, K, RandomState, RandomState>,
}

impl<K, G> Default for DirectedGraph<K, G>
where
    K: Hash + Eq + Clone + Debug,
    G: GrowableGraph,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, G> DirectedGraph<K, G>
where
    K: Hash + Eq + Clone + Debug,
    G: GrowableGraph,
{
    pub fn new() -> Self {
        Self {
            lower_graph: G::new(),
            vertex_keys: BiHashMap::with_hashers(RandomState::new(), RandomState::new()),
        }
    }

    /// Builds a graph from `(source, sink)` pairs.
    ///
    /// Endpoints are added as vertices in the order they appear.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (K, K)>,
    {
        let mut res = Self::new();
        let ids: Vec<_> = edges
            .into_iter()
            .map(|(src, snk)| (res.ensure_vertex(src), res.ensure_vertex(snk)))
            .collect();
        for (src, snk) in ids {
            res.lower_graph.add_edge(src, snk);
        }
        res
    }

    /// Adds a vertex with no edges.
    ///
    /// Adding an existing key keeps the vertex and its edges unchanged,
    /// and emits a warning.
    pub fn add_vertex(&mut self, key: K) -> VertexId {
        if let Some(vid) = self.vertex_keys.get_by_right(&key) {
            warn!(vertex = ?key, "vertex already exists");
            return *vid;
        }
        self.insert_vertex(key)
    }

    /// Adds a directed edge from `source` to `sink`.
    ///
    /// Both endpoints must have been added. Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, source: &K, sink: &K) -> Result<()> {
        let src = self.require(source)?;
        let snk = self.require(sink)?;
        if self.lower_graph.add_edge(src, snk) {
            debug!(source = ?source, sink = ?sink, "edge added");
        }
        Ok(())
    }

    fn ensure_vertex(&mut self, key: K) -> VertexId {
        match self.vertex_keys.get_by_right(&key) {
            Some(vid) => *vid,
            None => self.insert_vertex(key),
        }
    }

    fn insert_vertex(&mut self, key: K) -> VertexId {
        let vid = self.lower_graph.add_vertex();
        self.vertex_keys.insert(vid, key);
        vid
    }
}

impl<K, G> DirectedGraph<K, G>
where
    K: Hash + Eq + Clone + Debug,
    G: QueryableGraph,
{
    pub fn vertex_size(&self) -> usize {
        self.vertex_keys.len()
    }

    pub fn edge_size(&self) -> usize {
        self.lower_graph.edge_size()
    }

    /// Iterates over vertices in the order of the underlying graph.
    pub fn iter_vertices(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        self.keys_of(self.lower_graph.iter_vertices())
    }

    pub fn contains_vertex(&self, key: &K) -> bool {
        self.vertex_keys.contains_right(key)
    }

    pub fn contains_edge(&self, source: &K, sink: &K) -> bool {
        match (self.vertex_id(source), self.vertex_id(sink)) {
            (Some(src), Some(snk)) => self.lower_graph.contains_edge(&src, &snk),
            _ => false,
        }
    }

    /// Vertices directly reachable from `key` by one edge.
    pub fn get_neighbors(&self, key: &K) -> Result<Box<dyn Iterator<Item = &K> + '_>> {
        let vid = self.require(key)?;
        Ok(self.keys_of(self.lower_graph.out_neighbors(&vid)))
    }

    /// Lazily visits every vertex reachable from `start` in breadth-first order.
    pub fn bft(&self, start: &K) -> Result<Box<dyn Iterator<Item = &K> + '_>> {
        let vid = self.require(start)?;
        Ok(self.keys_of(self.lower_graph.bft(vid)))
    }

    /// Lazily visits every vertex reachable from `start` in depth-first order.
    ///
    /// See [Traversal::dft].
    pub fn dft(&self, start: &K) -> Result<Box<dyn Iterator<Item = &K> + '_>> {
        let vid = self.require(start)?;
        Ok(self.keys_of(self.lower_graph.dft(vid)))
    }

    /// Lazily visits every vertex reachable from `start` in recursive depth-first pre-order.
    ///
    /// See [Traversal::dft_recursive].
    pub fn dft_recursive(&self, start: &K) -> Result<Box<dyn Iterator<Item = &K> + '_>> {
        let vid = self.require(start)?;
        Ok(self.keys_of(self.lower_graph.dft_recursive(vid)))
    }

    /// A path from `start` to `goal` with the fewest edges.
    ///
    /// `Ok(None)` if `goal` is unreachable, which includes `goal` being absent.
    /// Fails if `start` is absent.
    pub fn bfs(&self, start: &K, goal: &K) -> Result<Option<Vec<K>>> {
        self.search("bfs", start, goal, |g, src, snk| g.bfs(src, snk))
    }

    /// Some path from `start` to `goal`, found in depth-first order.
    ///
    /// Errors are as in [DirectedGraph::bfs].
    pub fn dfs(&self, start: &K, goal: &K) -> Result<Option<Vec<K>>> {
        self.search("dfs", start, goal, |g, src, snk| g.dfs(src, snk))
    }

    /// Some path from `start` to `goal`, found in recursive depth-first order.
    ///
    /// Errors are as in [DirectedGraph::bfs].
    pub fn dfs_recursive(&self, start: &K, goal: &K) -> Result<Option<Vec<K>>> {
        self.search("dfs_recursive", start, goal, |g, src, snk| {
            g.dfs_recursive(src, snk)
        })
    }

    fn search<F>(&self, name: &str, start: &K, goal: &K, f: F) -> Result<Option<Vec<K>>>
    where
        F: FnOnce(&G, VertexId, VertexId) -> Option<Vec<VertexId>>,
    {
        let src = self.require(start)?;
        let snk = match self.vertex_id(goal) {
            Some(snk) => snk,
            None => {
                debug!(search = name, goal = ?goal, "goal is not a vertex");
                return Ok(None);
            }
        };
        match f(&self.lower_graph, src, snk) {
            Some(path) => {
                debug!(
                    search = name,
                    start = ?start,
                    goal = ?goal,
                    edges = path.len() - 1,
                    "path found"
                );
                path.iter()
                    .map(|vid| {
                        self.vertex_key(vid)
                            .cloned()
                            .ok_or_else(|| GraphError::unknown_vertex(vid))
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(Some)
            }
            None => {
                debug!(search = name, start = ?start, goal = ?goal, "no path");
                Ok(None)
            }
        }
    }

    fn keys_of<'a, I>(&'a self, vids: I) -> Box<dyn Iterator<Item = &'a K> + 'a>
    where
        I: Iterator<Item = VertexId> + 'a,
    {
        Box::new(vids.filter_map(move |vid| self.vertex_keys.get_by_left(&vid)))
    }
}

impl<K, G> DirectedGraph<K, G>
where
    K: Hash + Eq,
{
    pub fn vertex_id(&self, key: &K) -> Option<VertexId> {
        self.vertex_keys.get_by_right(key).copied()
    }

    pub fn vertex_key(&self, vid: &VertexId) -> Option<&K> {
        self.vertex_keys.get_by_left(vid)
    }

    pub fn lower_graph(&self) -> &G {
        &self.lower_graph
    }

    fn require(&self, key: &K) -> Result<VertexId>
    where
        K: Debug,
    {
        self.vertex_id(key).ok_or_else(|| GraphError::unknown_vertex(key))
    }
}

/// Renders the adjacency mapping, e.g. `{1: {2}, 2: {3, 4}}`.
impl<K, G> Debug for DirectedGraph<K, G>
where
    K: Hash + Eq + Clone + Debug,
    G: QueryableGraph,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.lower_graph.iter_vertices().filter_map(|vid| {
                self.vertex_key(&vid).map(|key| (key, NeighborsDebug { graph: self, vid }))
            }))
            .finish()
    }
}

struct NeighborsDebug<'a, K, G>
where
    K: Hash + Eq,
{
    graph: &'a DirectedGraph<K, G>,
    vid: VertexId,
}

impl<'a, K, G> Debug for NeighborsDebug<'a, K, G>
where
    K: Hash + Eq + Clone + Debug,
    G: QueryableGraph,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.graph.keys_of(self.graph.lower_graph.out_neighbors(&self.vid)))
            .finish()
    }
}

#[cfg(test)]
impl<G> From<&directed::Ops> for DirectedGraph<usize, G>
where
    G: GrowableGraph,
{
    fn from(ops: &directed::Ops) -> Self {
        let mut res = Self::new();
        for op in ops.iter() {
            match op {
                directed::Op::AddVertex(vid) => {
                    res.add_vertex(vid.to_raw());
                }
                directed::Op::AddEdge((src, snk)) => {
                    let _ = res.add_edge(&src.to_raw(), &snk.to_raw());
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use std::collections::BTreeSet;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn lecture_graph() -> DirectedGraph<u32> {
        let mut g = DirectedGraph::new();
        for v in 1..=7 {
            g.add_vertex(v);
        }
        let edges = [
            (5, 3),
            (6, 3),
            (7, 1),
            (4, 7),
            (1, 2),
            (7, 6),
            (2, 4),
            (3, 5),
            (2, 3),
            (4, 6),
        ];
        for (src, snk) in edges.iter() {
            g.add_edge(src, snk).unwrap();
        }
        g
    }

    fn neighbors<K, G>(g: &DirectedGraph<K, G>, key: &K) -> BTreeSet<K>
    where
        K: Hash + Eq + Ord + Clone + Debug,
        G: QueryableGraph,
    {
        g.get_neighbors(key).unwrap().cloned().collect()
    }

    #[test]
    fn adjacency_dump() {
        let g = lecture_graph();
        assert_eq!(
            format!("{:?}", g),
            "{1: {2}, 2: {3, 4}, 3: {5}, 4: {6, 7}, 5: {3}, 6: {3}, 7: {1, 6}}"
        );
    }

    #[test]
    fn new_vertex_has_no_neighbors() {
        let mut g = DirectedGraph::<u32>::new();
        g.add_vertex(0);
        assert_eq!(neighbors(&g, &0), BTreeSet::new());
        assert_eq!(g.vertex_size(), 1);
        assert_eq!(g.edge_size(), 0);
    }

    #[test]
    fn edges_are_directed() {
        let mut g = DirectedGraph::<u32>::new();
        g.add_vertex(0);
        g.add_vertex(1);
        g.add_edge(&0, &1).unwrap();
        assert!(g.contains_edge(&0, &1));
        assert!(!g.contains_edge(&1, &0));
        assert_eq!(neighbors(&g, &0), BTreeSet::from([1]));
        assert_eq!(neighbors(&g, &1), BTreeSet::new());

        g.add_edge(&1, &0).unwrap();
        assert_eq!(neighbors(&g, &1), BTreeSet::from([0]));
    }

    #[test]
    fn duplicated_edge_is_no_op() {
        let mut g = DirectedGraph::<u32>::new();
        g.add_vertex(0);
        g.add_vertex(1);
        g.add_edge(&0, &1).unwrap();
        g.add_edge(&0, &1).unwrap();
        assert_eq!(g.edge_size(), 1);
    }

    #[test]
    fn unknown_vertex() {
        let mut g = DirectedGraph::<u32>::new();
        g.add_vertex(0);
        assert_eq!(
            g.add_edge(&0, &9),
            Err(GraphError::UnknownVertex("9".to_string()))
        );
        assert_eq!(
            g.add_edge(&8, &0),
            Err(GraphError::UnknownVertex("8".to_string()))
        );
        assert_eq!(g.edge_size(), 0);
        assert!(g.get_neighbors(&9).is_err());
        assert!(g.bft(&9).is_err());
        assert!(g.dft(&9).is_err());
        assert!(g.dft_recursive(&9).is_err());
        assert!(g.bfs(&9, &0).is_err());
        assert!(g.dfs(&9, &9).is_err());
        assert!(g.dfs_recursive(&9, &0).is_err());
        assert_eq!(
            g.add_edge(&0, &9).unwrap_err().to_string(),
            "unknown vertex 9"
        );
    }

    #[test]
    fn absent_goal_is_unreachable() {
        let g = lecture_graph();
        assert_eq!(g.bfs(&1, &99), Ok(None));
        assert_eq!(g.dfs(&1, &99), Ok(None));
        assert_eq!(g.dfs_recursive(&1, &99), Ok(None));
    }

    #[derive(Clone)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn re_adding_vertex_keeps_edges() {
        let captured = Captured(Arc::new(Mutex::new(vec![])));
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let g = tracing::subscriber::with_default(subscriber, || {
            let mut g = lecture_graph();
            let before = g.vertex_id(&2);
            assert_eq!(Some(g.add_vertex(2)), before);
            g
        });
        assert_eq!(neighbors(&g, &2), BTreeSet::from([3, 4]));
        assert_eq!(g.vertex_size(), 7);
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("vertex already exists"));
    }

    #[test]
    fn lecture_traversals() {
        let g = lecture_graph();
        let bft: Vec<_> = g.bft(&1).unwrap().copied().collect();
        assert_eq!(bft, vec![1, 2, 3, 4, 5, 6, 7]);
        let dft: Vec<_> = g.dft(&1).unwrap().copied().collect();
        assert_eq!(dft, vec![1, 2, 4, 7, 6, 3, 5]);
        let dft_recursive: Vec<_> = g.dft_recursive(&1).unwrap().copied().collect();
        assert_eq!(dft_recursive, vec![1, 2, 3, 5, 4, 6, 7]);
    }

    #[test]
    fn lecture_searches() {
        let g = lecture_graph();
        assert_eq!(g.bfs(&1, &6), Ok(Some(vec![1, 2, 4, 6])));
        assert_eq!(g.dfs(&1, &6), Ok(Some(vec![1, 2, 4, 7, 6])));
        assert_eq!(g.dfs_recursive(&1, &6), Ok(Some(vec![1, 2, 4, 6])));
        assert_eq!(g.bfs(&3, &1), Ok(None));
        assert_eq!(g.bfs(&6, &6), Ok(Some(vec![6])));
    }

    #[test]
    fn lecture_searches_on_petgraph() {
        let mut g = DirectedGraph::<u32, directed::AdjacentListGraph>::new();
        for v in 1..=7 {
            g.add_vertex(v);
        }
        let edges = [
            (5, 3),
            (6, 3),
            (7, 1),
            (4, 7),
            (1, 2),
            (7, 6),
            (2, 4),
            (3, 5),
            (2, 3),
            (4, 6),
        ];
        for (src, snk) in edges.iter() {
            g.add_edge(src, snk).unwrap();
        }
        assert_eq!(g.bfs(&1, &6).unwrap().map(|p| p.len()), Some(4));
        let dfs = g.dfs(&1, &6).unwrap().unwrap();
        assert!(dfs == vec![1, 2, 4, 6] || dfs == vec![1, 2, 4, 7, 6]);
        let dfs_recursive = g.dfs_recursive(&1, &6).unwrap().unwrap();
        assert!(dfs_recursive == vec![1, 2, 4, 6] || dfs_recursive == vec![1, 2, 4, 7, 6]);
        let bft: BTreeSet<_> = g.bft(&1).unwrap().copied().collect();
        assert_eq!(bft, (1..=7).collect());
    }

    #[test]
    fn from_edges_adds_endpoints_in_order() {
        let g = DirectedGraph::<&str>::from_edges(vec![("b", "a"), ("c", "a"), ("b", "c")]);
        assert_eq!(
            g.iter_vertices().copied().collect::<Vec<_>>(),
            vec!["b", "a", "c"]
        );
        assert_eq!(g.edge_size(), 3);
        assert!(g.contains_edge(&"b", &"c"));
    }

    #[quickcheck]
    fn backends_agree(ops: directed::Ops) {
        let tree: DirectedGraph<usize> = (&ops).into();
        let list: DirectedGraph<usize, directed::AdjacentListGraph> = (&ops).into();
        assert_eq!(tree.vertex_size(), list.vertex_size());
        assert_eq!(tree.edge_size(), list.edge_size());
        for v in tree.iter_vertices() {
            assert_eq!(neighbors(&tree, v), neighbors(&list, v));
            let tree_reach: BTreeSet<_> = tree.dft(v).unwrap().collect();
            let list_reach: BTreeSet<_> = list.dft_recursive(v).unwrap().collect();
            assert_eq!(tree_reach, list_reach);
        }
    }
}
