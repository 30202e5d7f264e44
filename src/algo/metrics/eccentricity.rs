use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::debug;

use super::*;

/// Eccentricities of all nodes plus the derived component properties.
///
/// Distances ignore edge direction. The eccentricity of a node is the largest distance to any
/// node it reaches; isolated nodes have eccentricity `0`.
#[derive(Debug, Clone, Default)]
pub struct Eccentricities {
    values: Vec<NumNodes>,
    is_wcc: bool,
    searches: usize,
}

impl Eccentricities {
    /// Returns the eccentricity of every node, indexed by id
    pub fn values(&self) -> &[NumNodes] {
        &self.values
    }

    /// Returns *true* if the graph is a single (non-empty) weakly connected component
    pub fn is_wcc(&self) -> bool {
        self.is_wcc
    }

    /// Returns the smallest eccentricity, if the graph is weakly connected
    pub fn radius(&self) -> Option<NumNodes> {
        self.values.iter().copied().min().filter(|_| self.is_wcc)
    }

    /// Returns the largest eccentricity, if the graph is weakly connected
    pub fn diameter(&self) -> Option<NumNodes> {
        self.values.iter().copied().max().filter(|_| self.is_wcc)
    }

    /// Returns the number of single-source searches that were required
    pub fn number_of_searches(&self) -> usize {
        self.searches
    }
}

impl<G: GraphView> GraphMetrics<G> {
    /// Returns the eccentricity class, computing it on first access
    pub fn eccentricity_sets(&self) -> &Eccentricities {
        self.eccentricities
            .get_or_init(|| EccentricitySearch::new(self.degrees(), self.neighbor_sets()).run())
    }

    /// Returns the eccentricity of every node, indexed by id
    pub fn eccentricities(&self) -> &[NumNodes] {
        self.eccentricity_sets().values()
    }

    /// Returns the eccentricity of `u`
    /// ** Panics if `u >= n` **
    pub fn eccentricity_of(&self, u: NodeId) -> NumNodes {
        self.eccentricities()[index_of(u)]
    }

    /// Returns the eccentricity of a labelled node
    pub fn eccentricity(&self, label: &G::Label) -> GraphResult<NumNodes> {
        Ok(self.eccentricity_of(self.graph.node_id(label)?))
    }

    /// Returns the radius, or `None` if the graph is not weakly connected
    pub fn radius(&self) -> Option<NumNodes> {
        self.eccentricity_sets().radius()
    }

    /// Returns the diameter, or `None` if the graph is not weakly connected
    pub fn diameter(&self) -> Option<NumNodes> {
        self.eccentricity_sets().diameter()
    }

    /// Returns *true* if the graph is a single weakly connected component
    pub fn is_wcc(&self) -> bool {
        self.eccentricity_sets().is_wcc()
    }
}

const UNREACHED: NumNodes = NumNodes::MAX;

/// Bounded eccentricity computation in the style of Takes and Kosters.
///
/// Every search from a source `s` with eccentricity `e` yields for each reached node `v` at
/// distance `d` the bounds `max(|e - d|, d) <= ecc(v) <= e + d`. Nodes whose bounds meet are
/// resolved without a search of their own. Leaves are derived from their neighbor.
struct EccentricitySearch<'a> {
    degrees: &'a [NumEdges],
    neighbors: &'a [FxHashSet<NodeId>],
    lower: Vec<NumNodes>,
    upper: Vec<NumNodes>,
    resolved: Vec<bool>,
    values: Vec<NumNodes>,
    distances: Vec<NumNodes>,
    heap: BinaryHeap<Reverse<(NumNodes, NodeId)>>,
}

impl<'a> EccentricitySearch<'a> {
    fn new(degrees: &'a [NumEdges], neighbors: &'a [FxHashSet<NodeId>]) -> Self {
        let n = degrees.len();
        Self {
            degrees,
            neighbors,
            lower: vec![0; n],
            upper: vec![UNREACHED; n],
            resolved: vec![false; n],
            values: vec![0; n],
            distances: vec![UNREACHED; n],
            heap: BinaryHeap::new(),
        }
    }

    fn run(mut self) -> Eccentricities {
        let n = self.degrees.len();
        if n == 0 {
            return Eccentricities::default();
        }

        let mut is_wcc = true;
        for u in 0..n {
            if self.degrees[u] == 0 {
                self.resolve(u, 0);
                is_wcc &= n == 1;
            }
        }

        let mut searches = 0;
        for s in 0..n {
            if self.resolved[s] || self.degrees[s] <= 1 {
                continue;
            }

            searches += 1;
            let (ecc, reached_all) = self.shortest_paths(s as NodeId);
            is_wcc &= reached_all;

            assert!(
                self.lower[s] <= ecc && ecc <= self.upper[s],
                "eccentricity {ecc} of node {s} outside of its bounds [{}, {}]",
                self.lower[s],
                self.upper[s]
            );
            self.resolve(s, ecc);

            for v in 0..n {
                let d = self.distances[v];
                if self.resolved[v] || d == UNREACHED {
                    continue;
                }

                self.lower[v] = self.lower[v].max(ecc.abs_diff(d)).max(d);
                self.upper[v] = self.upper[v].min(ecc + d);
                if self.lower[v] == self.upper[v] {
                    self.resolve(v, self.lower[v]);
                }
            }
        }

        for v in 0..n {
            if !self.resolved[v] {
                assert_eq!(self.degrees[v], 1, "node {v} was neither searched nor bounded");
                let ecc = self.leaf_eccentricity(v);
                self.resolve(v, ecc);
            }
        }

        if searches == 0 {
            // only isolated nodes and components consisting of a single edge
            is_wcc = n == 1 || (n == 2 && self.degrees.iter().all(|&d| d == 1));
        }

        debug!(nodes = n, searches, is_wcc, "computed eccentricities");
        Eccentricities {
            values: self.values,
            is_wcc,
            searches,
        }
    }

    fn resolve(&mut self, u: usize, ecc: NumNodes) {
        self.values[u] = ecc;
        self.lower[u] = ecc;
        self.upper[u] = ecc;
        self.resolved[u] = true;
    }

    /// A leaf `v` with neighbor `w` is one step further from everything than `w`, unless `w`
    /// has no other neighbor, in which case the component is the single edge `{v, w}`.
    fn leaf_eccentricity(&self, v: usize) -> NumNodes {
        let v_id = v as NodeId;
        let w = *self.neighbors[v]
            .iter()
            .next()
            .expect("node of degree one has a neighbor");

        let w_has_other_neighbor = self.neighbors[index_of(w)]
            .iter()
            .any(|&x| x != v_id && x != w);
        if w_has_other_neighbor {
            assert!(self.resolved[index_of(w)], "neighbor {w} of leaf {v} is unresolved");
            self.values[index_of(w)] + 1
        } else {
            1
        }
    }

    /// Unit-weight Dijkstra from `source`; stale heap entries are skipped on pop.
    /// Returns the eccentricity of `source` and whether every node was reached.
    fn shortest_paths(&mut self, source: NodeId) -> (NumNodes, bool) {
        self.distances.fill(UNREACHED);
        self.distances[index_of(source)] = 0;
        self.heap.clear();
        self.heap.push(Reverse((0, source)));

        let mut ecc = 0;
        let mut reached = 0;
        while let Some(Reverse((d, u))) = self.heap.pop() {
            if d > self.distances[index_of(u)] {
                continue;
            }
            ecc = ecc.max(d);
            reached += 1;

            for &v in &self.neighbors[index_of(u)] {
                if d + 1 < self.distances[index_of(v)] {
                    self.distances[index_of(v)] = d + 1;
                    self.heap.push(Reverse((d + 1, v)));
                }
            }
        }

        (ecc, reached == self.distances.len())
    }
}
