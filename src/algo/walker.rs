/*!
# Graph Walks

A [`GraphWalker`] moves along the edges of a graph one step at a time. Where to go next is
decided by a [`NextNodeSelector`] that only sees the previous node, the current node and a
[`GraphMetrics`] instance. [`RandomWalker`] picks a uniform successor (or neighbor); any
closure with the matching signature works as well.

```
use flatgraphs::{prelude::*, algo::*};
use rand::SeedableRng;

let graph = DenseMemoryGraph::from_edges([("A", "B"), ("B", "C"), ("C", "A")]);
let metrics = GraphMetrics::new(&graph);

let rng = rand_pcg::Pcg64Mcg::seed_from_u64(1);
let mut walker = GraphWalker::new(&metrics, RandomWalker::new(rng));
walker.set_start_node(&"A").unwrap();

assert_eq!(walker.path(4).unwrap(), vec!["B", "C", "A", "B"]);
```
*/

use fxhash::FxHashMap;
use rand::Rng;
use tracing::trace;

use super::*;

/// Strategy deciding the next node of a walk
pub trait NextNodeSelector<G: GraphView> {
    /// Returns the node to move to from `current`; returning `current` stays in place.
    /// `previous` is `None` on the first step after a (re)start.
    fn next_node(
        &mut self,
        previous: Option<NodeId>,
        current: NodeId,
        metrics: &GraphMetrics<G>,
    ) -> NodeId;
}

impl<G, F> NextNodeSelector<G> for F
where
    G: GraphView,
    F: FnMut(Option<NodeId>, NodeId, &GraphMetrics<G>) -> NodeId,
{
    fn next_node(
        &mut self,
        previous: Option<NodeId>,
        current: NodeId,
        metrics: &GraphMetrics<G>,
    ) -> NodeId {
        self(previous, current, metrics)
    }
}

/// Moves to a uniformly random successor (directed) or neighbor (undirected).
/// Nodes without candidates are never left.
///
/// The choice is uniform over the *distinct* candidates, so parallel edges do not raise the
/// probability of their endpoint. The drawn index is located by walking the candidate set in its
/// iteration order, which costs `O(degree)` per step. That order only depends on the graph, so a
/// seeded walker reproduces its walks.
#[derive(Debug, Clone)]
pub struct RandomWalker<R> {
    rng: R,
    directed: bool,
}

impl<R: Rng> RandomWalker<R> {
    /// Creates a walker following edge directions
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            directed: true,
        }
    }

    /// Sets whether edges may only be followed in their direction.
    /// Default: `true`
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

impl<G: GraphView, R: Rng> NextNodeSelector<G> for RandomWalker<R> {
    fn next_node(
        &mut self,
        _previous: Option<NodeId>,
        current: NodeId,
        metrics: &GraphMetrics<G>,
    ) -> NodeId {
        let candidates = if self.directed {
            metrics.successors_of(current)
        } else {
            metrics.neighbors_of(current)
        };

        if candidates.is_empty() {
            return current;
        }

        let index = self.rng.random_range(0..candidates.len());
        *candidates
            .iter()
            .nth(index)
            .expect("selection index lies within the candidate set")
    }
}

/// Walks a graph step by step using a [`NextNodeSelector`]
pub struct GraphWalker<'a, G, S> {
    metrics: &'a GraphMetrics<G>,
    selector: S,
    current: NodeId,
    previous: NodeId,
}

impl<'a, G, S> GraphWalker<'a, G, S>
where
    G: GraphView,
    S: NextNodeSelector<G>,
{
    /// Creates a walker without a start node
    pub fn new(metrics: &'a GraphMetrics<G>, selector: S) -> Self {
        Self {
            metrics,
            selector,
            current: INVALID_NODE,
            previous: INVALID_NODE,
        }
    }

    /// Returns the selector
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// (Re)starts the walk at a labelled node
    pub fn set_start_node(&mut self, label: &G::Label) -> GraphResult<()> {
        let u = self.metrics.graph().node_id(label)?;
        self.set_start_node_id(u)
    }

    /// (Re)starts the walk at node `u`
    pub fn set_start_node_id(&mut self, u: NodeId) -> GraphResult<()> {
        self.check_node(u)?;
        self.current = u;
        self.previous = INVALID_NODE;
        Ok(())
    }

    /// Returns the node the walk currently is at
    pub fn current_node(&self) -> Option<NodeId> {
        (self.current != INVALID_NODE).then_some(self.current)
    }

    /// Returns the node the walk was at before the last step
    pub fn previous_node(&self) -> Option<NodeId> {
        (self.previous != INVALID_NODE).then_some(self.previous)
    }

    fn check_node(&self, node: NodeId) -> GraphResult<()> {
        let graph = self.metrics.graph();
        if graph.has_vertex(node) {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                number_of_nodes: graph.number_of_nodes(),
            })
        }
    }

    /// Advances the walk along one edge and returns the new current node.
    /// Fails if no start node was set or the selector returns an invalid node.
    pub fn step(&mut self) -> GraphResult<NodeId> {
        let current = self.current_node().ok_or_else(|| {
            GraphError::InvalidConfiguration("walk has no start node".to_string())
        })?;

        let previous = self.previous_node();
        let next = self.selector.next_node(previous, current, self.metrics);
        self.check_node(next)?;
        trace!(from = current, to = next, "walk step");

        self.previous = current;
        self.current = next;
        Ok(next)
    }

    /// Takes `steps` steps and returns the label of every node reached (the start excluded)
    pub fn path(&mut self, steps: usize) -> GraphResult<Vec<G::Label>> {
        let metrics = self.metrics;
        let graph = metrics.graph();
        (0..steps)
            .map(|_| {
                let u = self.step()?;
                graph.node_label(u).cloned()
            })
            .collect()
    }

    /// Takes `steps` steps and returns the label of the final node
    pub fn end_node(&mut self, steps: usize) -> GraphResult<G::Label> {
        for _ in 0..steps {
            self.step()?;
        }
        let current = self.current_node().ok_or_else(|| {
            GraphError::InvalidConfiguration("walk has no start node".to_string())
        })?;
        self.metrics.graph().node_label(current).cloned()
    }

    /// Runs `trials` walks of `steps` steps from `start` and counts how often each node ends
    /// a walk
    pub fn end_nodes(
        &mut self,
        start: &G::Label,
        steps: usize,
        trials: usize,
    ) -> GraphResult<FxHashMap<G::Label, usize>> {
        let mut histogram = FxHashMap::default();
        for _ in 0..trials {
            self.set_start_node(start)?;
            *histogram.entry(self.end_node(steps)?).or_insert(0) += 1;
        }
        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn walk_needs_start() {
        let graph = DenseMemoryGraph::from_edges([(0u32, 1u32)]);
        let metrics = GraphMetrics::new(&graph);
        let mut walker = GraphWalker::new(&metrics, RandomWalker::new(Pcg64Mcg::seed_from_u64(3)));

        assert!(walker.current_node().is_none());
        assert!(matches!(
            walker.step(),
            Err(GraphError::InvalidConfiguration(_))
        ));
        assert!(matches!(walker.end_node(0), Err(GraphError::InvalidConfiguration(_))));
        assert!(matches!(
            walker.set_start_node(&5),
            Err(GraphError::UnknownNode(_))
        ));
        assert!(matches!(
            walker.set_start_node_id(2),
            Err(GraphError::NodeOutOfRange { node: 2, .. })
        ));
    }

    #[test]
    fn directed_walk_follows_cycle() {
        let mut graph = DenseMemoryGraph::new();
        graph.connect_cycle(["A", "B", "C"]);
        let metrics = GraphMetrics::new(&graph);
        let mut walker = GraphWalker::new(&metrics, RandomWalker::new(Pcg64Mcg::seed_from_u64(3)));

        walker.set_start_node(&"B").unwrap();
        assert_eq!(walker.path(5).unwrap(), vec!["C", "A", "B", "C", "A"]);
        assert_eq!(walker.current_node(), Some(0));
        assert_eq!(walker.previous_node(), Some(2));

        assert_eq!(walker.end_node(0).unwrap(), "A");
        assert_eq!(walker.end_node(3).unwrap(), "A");
    }

    #[test]
    fn sinks_are_never_left() {
        let graph = DenseMemoryGraph::from_edges([("s", "t")]);
        let metrics = GraphMetrics::new(&graph);
        let mut walker = GraphWalker::new(&metrics, RandomWalker::new(Pcg64Mcg::seed_from_u64(3)));

        walker.set_start_node(&"s").unwrap();
        assert_eq!(walker.path(3).unwrap(), vec!["t", "t", "t"]);

        let histogram = walker.end_nodes(&"s", 10, 7).unwrap();
        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram[&"t"], 7);
    }

    #[test]
    fn undirected_walk_on_star() {
        let mut graph = DenseMemoryGraph::new();
        graph.connect_star(0u32, 1..=4);
        let metrics = GraphMetrics::new(&graph);

        let selector = RandomWalker::new(Pcg64Mcg::seed_from_u64(3)).directed(false);
        let mut walker = GraphWalker::new(&metrics, selector);

        walker.set_start_node(&2).unwrap();
        let path = walker.path(20).unwrap();
        for (i, label) in path.iter().enumerate() {
            // leaves and center alternate
            assert_eq!(*label == 0, i % 2 == 0);
        }

        let histogram = walker.end_nodes(&0, 3, 400).unwrap();
        assert_eq!(histogram.values().sum::<usize>(), 400);
        assert!(!histogram.contains_key(&0));
        assert_eq!(histogram.len(), 4);
        assert!(histogram.values().all(|&count| count > 50));
    }

    /// Moves to the largest neighbor that is not the previous node
    fn non_backtracking<G: GraphView>(
        previous: Option<NodeId>,
        current: NodeId,
        metrics: &GraphMetrics<G>,
    ) -> NodeId {
        metrics
            .neighbors_of(current)
            .iter()
            .copied()
            .filter(|&v| Some(v) != previous)
            .max()
            .unwrap_or(current)
    }

    /// Stays in place and records the previous node of every step
    #[derive(Default)]
    struct Recorder(Vec<Option<NodeId>>);

    impl<G: GraphView> NextNodeSelector<G> for Recorder {
        fn next_node(
            &mut self,
            previous: Option<NodeId>,
            current: NodeId,
            _metrics: &GraphMetrics<G>,
        ) -> NodeId {
            self.0.push(previous);
            current
        }
    }

    fn rogue<G: GraphView>(_: Option<NodeId>, _: NodeId, _: &GraphMetrics<G>) -> NodeId {
        17
    }

    #[test]
    fn functions_as_selectors() {
        let mut graph = DenseMemoryGraph::new();
        graph.connect_path(0u32..5);
        let metrics = GraphMetrics::new(&graph);

        let mut walker = GraphWalker::new(&metrics, non_backtracking);
        walker.set_start_node(&2).unwrap();
        // stays once at the dead end, then may turn around
        assert_eq!(walker.path(4).unwrap(), vec![3, 4, 4, 3]);
        assert_eq!(walker.previous_node(), Some(4));

        let mut walker = GraphWalker::new(&metrics, Recorder::default());
        walker.set_start_node_id(1).unwrap();
        walker.end_node(3).unwrap();
        assert_eq!(walker.selector().0, vec![None, Some(1), Some(1)]);

        let mut walker = GraphWalker::new(&metrics, rogue);
        walker.set_start_node_id(0).unwrap();
        assert!(matches!(
            walker.step(),
            Err(GraphError::NodeOutOfRange { node: 17, .. })
        ));
        assert_eq!(walker.current_node(), Some(0));
    }

    #[test]
    fn parallel_edges_do_not_bias_steps() {
        let graph = DenseMemoryGraph::from_edges(
            std::iter::repeat(("hub", "a")).take(5).chain([("hub", "b")]),
        );
        let metrics = GraphMetrics::new(&graph);

        let walk = |seed| {
            let mut walker =
                GraphWalker::new(&metrics, RandomWalker::new(Pcg64Mcg::seed_from_u64(seed)));
            walker.end_nodes(&"hub", 1, 600).unwrap()
        };

        let histogram = walk(3);
        assert_eq!(histogram.len(), 2);
        assert!(histogram.values().all(|&count| count > 240));
        assert_eq!(walk(3), histogram);
    }
}
