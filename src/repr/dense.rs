use std::{
    fmt::Debug,
    ops::Range,
    sync::atomic::{AtomicBool, Ordering},
};

use fxhash::FxHashSet;
use parking_lot::{RwLock, RwLockReadGuard};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use tracing::debug;

use super::*;

/// Mixed with the edge count to seed the pivot generator of the lazy sort
const SORT_SEED: u64 = 0x6c61_7a79_736f_7274;

/// A directed multigraph over labelled nodes, stored as a flat edge sequence.
///
/// Edges are appended in insertion order; the first query that relies on the order (adjacency
/// lookups, slot accessors, edge iteration) sorts the sequence by `(source, destination)` once.
/// Afterwards successor lookups are a binary search over the sorted sources.
///
/// The sort runs under the write half of an internal lock with a re-check of the
/// optimization flag, so any number of threads may query a shared graph concurrently.
/// Insertions require `&mut self`.
///
/// # Example
/// ```
/// use flatgraphs::prelude::*;
///
/// let mut graph = DenseMemoryGraph::new();
/// graph.add_edge("A", "B");
/// graph.add_edge("B", "C");
/// graph.add_edge("C", "A");
///
/// assert_eq!(graph.number_of_nodes(), 3);
/// assert_eq!(graph.number_of_edges(), 3);
/// assert!(!graph.is_optimized());
///
/// assert_eq!(graph.successors(&"A").unwrap().into_iter().collect::<Vec<_>>(), vec!["B"]);
/// assert!(graph.is_optimized());
/// ```
pub struct MemoryGraph<N, S> {
    nodes: NodeIndex<N>,
    store: RwLock<S>,
    is_optimized: AtomicBool,
}

/// Unweighted graph; every edge reports weight `1.0`
pub type DenseMemoryGraph<N> = MemoryGraph<N, FlatEdgeStore>;

/// Graph with one finite weight per edge slot
pub type WeightedDenseMemoryGraph<N> = MemoryGraph<N, WeightedEdgeStore>;

impl<N, S: Default> Default for MemoryGraph<N, S> {
    fn default() -> Self {
        Self {
            nodes: NodeIndex::default(),
            store: RwLock::new(S::default()),
            is_optimized: AtomicBool::new(true),
        }
    }
}

impl<N: NodeLabel, S: EdgeStore> Clone for MemoryGraph<N, S> {
    fn clone(&self) -> Self {
        let store = self.store.read_recursive();
        Self {
            nodes: self.nodes.clone(),
            is_optimized: AtomicBool::new(self.is_optimized.load(Ordering::Acquire)),
            store: RwLock::new(store.clone()),
        }
    }
}

impl<N: NodeLabel, S: EdgeStore> Debug for MemoryGraph<N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGraph")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.number_of_edges())
            .field("weighted", &S::WEIGHTED)
            .field("optimized", &self.is_optimized())
            .finish()
    }
}

impl<N: NodeLabel, S: EdgeStore> MemoryGraph<N, S> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with space for `nodes` nodes and `edges` edges
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut store = S::default();
        store.reserve(edges);
        Self {
            nodes: NodeIndex::with_capacity(nodes),
            store: RwLock::new(store),
            is_optimized: AtomicBool::new(true),
        }
    }

    /// Assembles a graph from its parts.
    /// The caller guarantees that `store` is sorted if `optimized` is set and that all endpoints
    /// are ids of `nodes`.
    pub(crate) fn from_raw_parts(nodes: NodeIndex<N>, store: S, optimized: bool) -> Self {
        let optimized = optimized || store.len() < 2;
        Self {
            nodes,
            store: RwLock::new(store),
            is_optimized: AtomicBool::new(optimized),
        }
    }

    /// Returns the node index and a read guard of the edge store in their current
    /// (possibly unsorted) state
    pub(crate) fn raw_parts(&self) -> (&NodeIndex<N>, RwLockReadGuard<'_, S>, bool) {
        let store = self.store.read_recursive();
        let optimized = self.is_optimized.load(Ordering::Acquire);
        (&self.nodes, store, optimized)
    }

    /// Returns *true* if `label` is a node of the graph
    pub fn contains_node(&self, label: &N) -> bool {
        self.nodes.id_of(label).is_some()
    }

    /// Returns *true* if the edge sequence is currently known to be sorted
    pub fn is_optimized(&self) -> bool {
        self.is_optimized.load(Ordering::Acquire)
    }

    /// Sorts the edge sequence by `(source, destination)` unless it is already sorted.
    ///
    /// Concurrent callers serialize on the write lock; whoever acquires it after a completed
    /// sort finds the flag set and returns without touching the edges.
    pub fn optimize(&self) {
        if self.is_optimized.load(Ordering::Acquire) {
            return;
        }

        let mut store = self.store.write();
        if self.is_optimized.load(Ordering::Acquire) {
            return;
        }

        debug!(edges = store.len(), weighted = S::WEIGHTED, "sorting edge sequence");
        let mut rng = Pcg64Mcg::seed_from_u64(SORT_SEED ^ store.len() as u64);
        sort_edges(&mut *store, &mut rng);

        self.is_optimized.store(true, Ordering::Release);
    }

    /// Returns a read guard of the edge store after making sure it is sorted
    fn sorted_store(&self) -> RwLockReadGuard<'_, S> {
        self.optimize();
        self.store.read_recursive()
    }

    /// Returns the first edge slot whose source is `u`, or `m` if `u` has no outgoing edge.
    ///
    /// A binary search lands on some slot of the run of `u`'s edges, from where the
    /// search walks back to the start of the run.
    pub fn first_edge_slot_of(&self, u: NodeId) -> EdgeSlot {
        first_slot_with_source(&*self.sorted_store(), u)
    }

    /// Returns the slots of all edges leaving `u` (empty if there are none)
    pub fn out_edge_slots(&self, u: NodeId) -> Range<EdgeSlot> {
        let store = self.sorted_store();
        let first = first_slot_with_source(&*store, u);
        let mut end = first;
        while end < store.len() && store.source_of(end) == u {
            end += 1;
        }
        first..end
    }

    /// Appends an edge between existing ids
    pub(crate) fn push_edge(&mut self, edge: Edge, weight: f64) {
        debug_assert!(self.has_vertex(edge.0) && self.has_vertex(edge.1));
        self.store.get_mut().push_edge(edge, weight);
        *self.is_optimized.get_mut() = false;
    }

    fn check_slot(&self, slot: EdgeSlot) -> GraphResult<()> {
        let number_of_edges = self.number_of_edges();
        if slot < number_of_edges {
            Ok(())
        } else {
            Err(GraphError::EdgeOutOfRange {
                slot,
                number_of_edges,
            })
        }
    }

    /// Builds a graph equal to `source`: nodes are inserted in id order (preserving ids) and
    /// edges in slot order. Weights are dropped when copying into an unweighted graph.
    pub fn copy_from<G>(source: &G) -> Self
    where
        G: GraphView<Label = N>,
    {
        let mut graph = Self::with_capacity(source.len(), source.number_of_edges());
        for label in source.labels() {
            graph.add_node(label.clone());
        }
        for (edge, weight) in source.weighted_edges() {
            graph.push_edge(edge, weight);
        }
        graph
    }
}

fn first_slot_with_source<S: EdgeStore>(store: &S, u: NodeId) -> EdgeSlot {
    let (mut lo, mut hi) = (0, store.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match store.source_of(mid).cmp(&u) {
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
            std::cmp::Ordering::Equal => {
                let mut first = mid;
                while first > 0 && store.source_of(first - 1) == u {
                    first -= 1;
                }
                return first;
            }
        }
    }
    store.len()
}

/// Iterator over the sorted edge sequence; holds a read guard of the store while alive.
pub struct WeightedEdges<'a, S> {
    store: RwLockReadGuard<'a, S>,
    slot: EdgeSlot,
}

impl<S: EdgeStore> Iterator for WeightedEdges<'_, S> {
    type Item = (Edge, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.slot >= self.store.len() {
            return None;
        }
        let item = (self.store.endpoints(self.slot), self.store.weight_of(self.slot));
        self.slot += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.store.len() - self.slot;
        (rem, Some(rem))
    }
}

impl<S: EdgeStore> ExactSizeIterator for WeightedEdges<'_, S> {}

impl<N: NodeLabel, S: EdgeStore> GraphNodeOrder for MemoryGraph<N, S> {
    fn number_of_nodes(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }
}

impl<N: NodeLabel, S: EdgeStore> GraphEdgeOrder for MemoryGraph<N, S> {
    fn number_of_edges(&self) -> NumEdges {
        self.store.read_recursive().len()
    }
}

impl<N: NodeLabel, S: EdgeStore> GraphView for MemoryGraph<N, S> {
    type Label = N;

    fn node_label(&self, u: NodeId) -> GraphResult<&N> {
        self.nodes
            .label_of(u)
            .ok_or(GraphError::NodeOutOfRange {
                node: u,
                number_of_nodes: self.number_of_nodes(),
            })
    }

    fn node_id(&self, label: &N) -> GraphResult<NodeId> {
        self.nodes
            .id_of(label)
            .ok_or_else(|| GraphError::unknown_node(label))
    }

    fn edge_endpoints(&self, slot: EdgeSlot) -> GraphResult<Edge> {
        self.check_slot(slot)?;
        Ok(self.sorted_store().endpoints(slot))
    }

    fn edge_weight(&self, slot: EdgeSlot) -> GraphResult<f64> {
        self.check_slot(slot)?;
        Ok(self.sorted_store().weight_of(slot))
    }

    fn is_weighted(&self) -> bool {
        S::WEIGHTED
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.weighted_edges().map(|(edge, _)| edge)
    }

    fn weighted_edges(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        WeightedEdges {
            store: self.sorted_store(),
            slot: 0,
        }
    }

    fn successors_of(&self, u: NodeId) -> FxHashSet<NodeId> {
        assert!(self.has_vertex(u), "node id {u} is out of range");

        let store = self.sorted_store();
        let mut successors = FxHashSet::default();
        let mut slot = first_slot_with_source(&*store, u);
        while slot < store.len() && store.source_of(slot) == u {
            successors.insert(store.target_of(slot));
            slot += 1;
        }
        successors
    }

    fn labels(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.labels().iter()
    }
}

impl<N: NodeLabel, S: EdgeStore> GraphEdgeEditing for MemoryGraph<N, S> {
    fn add_node(&mut self, label: N) -> NodeId {
        self.nodes.insert(label)
    }

    fn add_edge(&mut self, src: N, dst: N) {
        let u = self.add_node(src);
        let v = self.add_node(dst);
        self.push_edge(Edge(u, v), 1.0);
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.store.get_mut().clear();
        *self.is_optimized.get_mut() = true;
    }
}

impl<N: NodeLabel> WeightedGraphEdgeEditing for MemoryGraph<N, WeightedEdgeStore> {
    fn add_weighted_edge(&mut self, src: N, dst: N, weight: f64) -> GraphResult<()> {
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight(weight));
        }

        let u = self.add_node(src);
        let v = self.add_node(dst);
        self.push_edge(Edge(u, v), weight);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn three_cycle() -> DenseMemoryGraph<&'static str> {
        DenseMemoryGraph::from_edges([("A", "B"), ("B", "C"), ("C", "A")])
    }

    #[test]
    fn directed_three_cycle() {
        let graph = three_cycle();

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(
            graph.successors(&"A").unwrap(),
            ["B"].into_iter().collect::<FxHashSet<_>>()
        );
        assert_eq!(
            graph.edges().collect_vec(),
            vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)]
        );
    }

    #[test]
    fn weights_survive_sorting() {
        let mut graph = WeightedDenseMemoryGraph::new();
        graph.add_weighted_edge("C", "D", 1.5).unwrap();
        graph.add_weighted_edge("A", "B", 3.0).unwrap();
        graph.add_edge("B", "A");

        let ab = Edge(graph.node_id(&"A").unwrap(), graph.node_id(&"B").unwrap());
        assert!(!graph.is_optimized());

        let slot = graph.edge_slots().find(|&s| graph.edge_endpoints(s).unwrap() == ab);
        let slot = slot.unwrap();
        assert!(graph.is_optimized());
        assert_eq!(graph.edge_weight(slot).unwrap(), 3.0);

        assert_eq!(
            graph.weighted_edges().collect_vec(),
            vec![(Edge(0, 1), 1.5), (Edge(2, 3), 3.0), (Edge(3, 2), 1.0)]
        );
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let mut graph = WeightedDenseMemoryGraph::new();
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                graph.add_weighted_edge(1u32, 2, weight),
                Err(GraphError::InvalidWeight(_))
            ));
        }
        assert!(graph.is_empty());
        assert!(graph.is_singleton());
    }

    #[test]
    fn lookups_fail_on_invalid_arguments() {
        let graph = three_cycle();

        assert!(matches!(
            graph.node_id(&"Z"),
            Err(GraphError::UnknownNode(label)) if label == "\"Z\""
        ));
        assert!(matches!(
            graph.node_label(3),
            Err(GraphError::NodeOutOfRange {
                node: 3,
                number_of_nodes: 3
            })
        ));
        assert!(graph.node_label(-1).is_err());
        assert!(matches!(
            graph.edge_endpoints(3),
            Err(GraphError::EdgeOutOfRange {
                slot: 3,
                number_of_edges: 3
            })
        ));
        assert!(graph.edge_weight(7).is_err());
        assert!(graph.successors(&"Q").is_err());
    }

    #[test]
    fn adjacency_search() {
        let mut graph = DenseMemoryGraph::new();
        for u in 0..6u32 {
            graph.add_node(u);
        }
        graph.add_edges([(4, 0), (1, 2), (4, 4), (1, 2), (1, 0), (4, 1)]);

        assert_eq!(graph.first_edge_slot_of(0), 6);
        assert_eq!(graph.first_edge_slot_of(1), 0);
        assert_eq!(graph.first_edge_slot_of(4), 3);
        assert_eq!(graph.first_edge_slot_of(5), 6);

        assert_eq!(graph.out_edge_slots(1), 0..3);
        assert_eq!(graph.out_edge_slots(2), 6..6);
        assert_eq!(graph.out_edge_slots(4), 3..6);

        assert_eq!(graph.successors_of(1), [0, 2].into_iter().collect::<FxHashSet<_>>());
        assert_eq!(graph.successors_of(4), [0, 1, 4].into_iter().collect::<FxHashSet<_>>());
        assert!(graph.successors_of(5).is_empty());
    }

    #[test]
    fn insertion_invalidates_order() {
        let mut graph = three_cycle();
        graph.optimize();
        assert!(graph.is_optimized());

        graph.add_edge("A", "A");
        assert!(!graph.is_optimized());
        assert_eq!(graph.edge_endpoints(0).unwrap(), Edge(0, 0));

        graph.clear();
        assert!(graph.is_optimized());
        assert!(graph.is_empty());
        assert_eq!(graph.add_node("C"), 0);
    }

    #[test]
    fn clone_and_copy_preserve_queries() {
        let mut graph = WeightedDenseMemoryGraph::with_capacity(4, 4);
        graph.add_weighted_edge(3u8, 1, 0.25).unwrap();
        graph.add_weighted_edge(1, 2, 0.5).unwrap();
        graph.add_weighted_edge(3, 2, 0.75).unwrap();

        let cloned = graph.clone();
        assert!(!cloned.is_optimized());

        let copied = WeightedDenseMemoryGraph::copy_from(&graph);
        let unweighted = DenseMemoryGraph::copy_from(&graph);

        for other in [&cloned, &copied] {
            assert_eq!(other.labels().collect_vec(), graph.labels().collect_vec());
            assert_eq!(
                other.weighted_edges().collect_vec(),
                graph.weighted_edges().collect_vec()
            );
        }
        assert_eq!(unweighted.edges().collect_vec(), graph.edges().collect_vec());
        assert!(unweighted.weighted_edges().all(|(_, w)| w == 1.0));
    }

    #[test]
    fn concurrent_readers_sort_once() {
        let mut graph = DenseMemoryGraph::new();
        for u in (0..2000u32).rev() {
            graph.add_edge(u % 97, (u * 7) % 89);
        }
        let expected = graph.clone();
        expected.optimize();
        let expected = expected.edges().collect_vec();

        std::thread::scope(|s| {
            for t in 0..8u32 {
                let graph = &graph;
                let expected = &expected;
                s.spawn(move || {
                    let u = graph.node_id(&(t * 3)).unwrap();
                    let naive: FxHashSet<_> = expected
                        .iter()
                        .filter(|e| e.source() == u)
                        .map(|e| e.target())
                        .collect();
                    assert_eq!(graph.successors_of(u), naive);
                    assert_eq!(&graph.edges().collect_vec(), expected);
                });
            }
        });

        assert!(graph.is_optimized());
    }
}

crate::testing::test_graph_ops!(
    test_dense_memory_graph,
    DenseMemoryGraph<u32>,
    (GraphView, GraphEdgeEditing)
);

crate::testing::test_graph_ops!(
    test_weighted_dense_memory_graph,
    WeightedDenseMemoryGraph<u32>,
    (GraphView, GraphEdgeEditing, WeightedGraphEdgeEditing)
);
