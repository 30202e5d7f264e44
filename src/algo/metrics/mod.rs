/*!
# Graph Metrics

[`GraphMetrics`] wraps a [`GraphView`] and computes structural statistics on demand:

| class | accessors |
|---|---|
| degrees | [`GraphMetrics::degree_of`], [`GraphMetrics::degrees`] |
| neighbors / successors | [`GraphMetrics::neighbors_of`], [`GraphMetrics::successors_of`] |
| triangles | [`GraphMetrics::triangles_of`], [`GraphMetrics::edge_triangles_of`] |
| assortativity | [`GraphMetrics::degree_assortativity`] |
| per-edge similarity | [`GraphMetrics::edge_jaccard_similarity`], [`GraphMetrics::edge_triangle_density`] |
| eccentricity | [`GraphMetrics::eccentricity_of`], [`GraphMetrics::radius`], [`GraphMetrics::diameter`], [`GraphMetrics::is_wcc`] |

The first request of any member computes the whole class (and its prerequisites) and caches
it. The cache never observes the wrapped graph: after mutating it through
[`GraphMetrics::graph_mut`] (or any other way) the owner **must** call [`GraphMetrics::clear`],
otherwise stale values are returned.

Degrees count edge endpoints (parallel edges count repeatedly, self-loops twice) while
neighbor and successor sets are deduplicated. Neighbors ignore edge direction.

# Example
```
use flatgraphs::{prelude::*, algo::*};

let mut graph = DenseMemoryGraph::new();
for leaf in 1..=5u32 {
    graph.add_edge(0u32, leaf);
}

let metrics = GraphMetrics::new(&graph);
assert_eq!(metrics.degree(&0).unwrap(), 5);
assert_eq!(metrics.eccentricity(&3).unwrap(), 2);
assert_eq!(metrics.radius(), Some(1));
assert_eq!(metrics.diameter(), Some(2));
assert!(metrics.is_wcc());
```
*/

mod eccentricity;
mod similarity;
mod triangles;

use std::sync::OnceLock;

use fxhash::FxHashSet;

use super::*;

pub use eccentricity::Eccentricities;
pub use triangles::TriangleSets;

/// Memoizing cache of structural statistics over a graph `G`.
///
/// `G` is usually a reference (`GraphMetrics::new(&graph)`); an owned graph can be mutated via
/// [`GraphMetrics::graph_mut`]. All accessors take `&self`: every class sits in its own
/// [`OnceLock`], so concurrent first accesses compute each class exactly once.
#[derive(Debug, Clone)]
pub struct GraphMetrics<G> {
    graph: G,
    degrees: OnceLock<Vec<NumEdges>>,
    neighbors: OnceLock<Vec<FxHashSet<NodeId>>>,
    successors: OnceLock<Vec<FxHashSet<NodeId>>>,
    triangles: OnceLock<TriangleSets>,
    assortativity: OnceLock<f64>,
    jaccard: OnceLock<Vec<f64>>,
    triangle_density: OnceLock<Vec<f64>>,
    eccentricities: OnceLock<Eccentricities>,
}

impl<G: GraphView> GraphMetrics<G> {
    /// Wraps a graph; nothing is computed until the first query
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            degrees: OnceLock::new(),
            neighbors: OnceLock::new(),
            successors: OnceLock::new(),
            triangles: OnceLock::new(),
            assortativity: OnceLock::new(),
            jaccard: OnceLock::new(),
            triangle_density: OnceLock::new(),
            eccentricities: OnceLock::new(),
        }
    }

    /// Returns the wrapped graph
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Returns the wrapped graph mutably.
    /// Cached values are **not** invalidated; call [`GraphMetrics::clear`] after mutating.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// Unwraps the graph, discarding all cached values
    pub fn into_inner(self) -> G {
        self.graph
    }

    /// Discards every cached value
    pub fn clear(&mut self) {
        self.degrees.take();
        self.neighbors.take();
        self.successors.take();
        self.triangles.take();
        self.assortativity.take();
        self.jaccard.take();
        self.triangle_density.take();
        self.eccentricities.take();
    }

    /// Returns the degree of every node, indexed by id
    pub fn degrees(&self) -> &[NumEdges] {
        self.degrees.get_or_init(|| {
            let mut degrees = vec![0; self.graph.len()];
            for Edge(u, v) in self.graph.edges() {
                degrees[index_of(u)] += 1;
                degrees[index_of(v)] += 1;
            }
            degrees
        })
    }

    /// Returns the number of edge endpoints at `u` (a self-loop counts twice)
    /// ** Panics if `u >= n` **
    pub fn degree_of(&self, u: NodeId) -> NumEdges {
        self.degrees()[index_of(u)]
    }

    /// Returns the deduplicated undirected neighborhood of `u`
    /// ** Panics if `u >= n` **
    pub fn neighbors_of(&self, u: NodeId) -> &FxHashSet<NodeId> {
        &self.neighbor_sets()[index_of(u)]
    }

    /// Returns the number of distinct neighbors of `u`
    /// ** Panics if `u >= n` **
    pub fn number_of_neighbors_of(&self, u: NodeId) -> NumNodes {
        self.neighbors_of(u).len() as NumNodes
    }

    /// Returns the deduplicated out-neighborhood of `u`
    /// ** Panics if `u >= n` **
    pub fn successors_of(&self, u: NodeId) -> &FxHashSet<NodeId> {
        &self.successor_sets()[index_of(u)]
    }

    fn neighbor_sets(&self) -> &[FxHashSet<NodeId>] {
        self.neighbors.get_or_init(|| {
            let mut sets = self.presized_sets();
            for Edge(u, v) in self.graph.edges() {
                sets[index_of(u)].insert(v);
                sets[index_of(v)].insert(u);
            }
            sets
        })
    }

    fn successor_sets(&self) -> &[FxHashSet<NodeId>] {
        self.successors.get_or_init(|| {
            let mut sets = self.presized_sets();
            for Edge(u, v) in self.graph.edges() {
                sets[index_of(u)].insert(v);
            }
            sets
        })
    }

    fn presized_sets(&self) -> Vec<FxHashSet<NodeId>> {
        self.degrees()
            .iter()
            .map(|&d| FxHashSet::with_capacity_and_hasher(d, Default::default()))
            .collect()
    }

    /// Returns the degree of a labelled node
    pub fn degree(&self, label: &G::Label) -> GraphResult<NumEdges> {
        Ok(self.degree_of(self.graph.node_id(label)?))
    }

    /// Returns the labels of all undirected neighbors of a labelled node
    pub fn neighbors(&self, label: &G::Label) -> GraphResult<FxHashSet<G::Label>> {
        let u = self.graph.node_id(label)?;
        self.to_labels(self.neighbors_of(u))
    }

    /// Returns the labels of all successors of a labelled node
    pub fn successors(&self, label: &G::Label) -> GraphResult<FxHashSet<G::Label>> {
        let u = self.graph.node_id(label)?;
        self.to_labels(self.successors_of(u))
    }

    fn to_labels(&self, ids: &FxHashSet<NodeId>) -> GraphResult<FxHashSet<G::Label>> {
        ids.iter()
            .map(|&v| self.graph.node_label(v).cloned())
            .collect()
    }
}
