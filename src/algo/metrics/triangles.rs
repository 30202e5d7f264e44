use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::debug;

use super::*;

/// Triangles (in the undirected sense) each node and each edge slot participates in.
///
/// Every triangle is listed once per corner. An edge slot lists every triangle whose side it
/// realizes in either direction, so parallel edges each carry the triangle. Self-loops never
/// close a triangle.
#[derive(Debug, Clone, Default)]
pub struct TriangleSets {
    nodes: Vec<Vec<Triangle>>,
    edges: Vec<Vec<Triangle>>,
    total: usize,
}

impl TriangleSets {
    /// Returns the triangles containing `u`
    /// ** Panics if `u >= n` **
    pub fn of_node(&self, u: NodeId) -> &[Triangle] {
        &self.nodes[index_of(u)]
    }

    /// Returns the triangles realized by the edge in `slot`
    /// ** Panics if `slot >= m` **
    pub fn of_edge(&self, slot: EdgeSlot) -> &[Triangle] {
        &self.edges[slot]
    }

    /// Returns the number of distinct triangles of the graph
    pub fn total(&self) -> usize {
        self.total
    }
}

impl<G: GraphView> GraphMetrics<G> {
    /// Returns all triangle sets, computing them on first access
    pub fn triangle_sets(&self) -> &TriangleSets {
        self.triangles.get_or_init(|| self.compute_triangles())
    }

    /// Returns the triangles containing `u`
    /// ** Panics if `u >= n` **
    pub fn triangles_of(&self, u: NodeId) -> &[Triangle] {
        self.triangle_sets().of_node(u)
    }

    /// Returns the number of triangles containing `u`
    /// ** Panics if `u >= n` **
    pub fn number_of_triangles_of(&self, u: NodeId) -> usize {
        self.triangles_of(u).len()
    }

    /// Returns the triangles realized by the edge in `slot`
    /// ** Panics if `slot >= m` **
    pub fn edge_triangles_of(&self, slot: EdgeSlot) -> &[Triangle] {
        self.triangle_sets().of_edge(slot)
    }

    /// Returns the number of distinct triangles of the graph
    pub fn number_of_triangles(&self) -> usize {
        self.triangle_sets().total()
    }

    /// Suri-Vassilvitskii style counting: nodes are ranked by `(degree, id)` and every node only
    /// pairs up neighbors of strictly higher rank. Each triangle is thus found exactly once, from
    /// its lowest ranked corner, and no high-degree node is expanded towards another one.
    fn compute_triangles(&self) -> TriangleSets {
        let n = self.graph.len();
        let degrees = self.degrees();
        let neighbors = self.neighbor_sets();

        let order = self
            .graph
            .vertices()
            .sorted_unstable_by_key(|&u| (degrees[index_of(u)], u))
            .collect_vec();
        let mut rank = vec![0usize; n];
        for (r, &u) in order.iter().enumerate() {
            rank[index_of(u)] = r;
        }

        let mut slots: FxHashMap<Edge, Vec<EdgeSlot>> = FxHashMap::default();
        for (slot, edge) in self.graph.edges().enumerate() {
            slots.entry(edge).or_default().push(slot);
        }

        let mut sets = TriangleSets {
            nodes: vec![Vec::new(); n],
            edges: vec![Vec::new(); self.graph.number_of_edges()],
            total: 0,
        };

        for &i in &order {
            let higher = neighbors[index_of(i)]
                .iter()
                .copied()
                .filter(|&j| rank[index_of(j)] > rank[index_of(i)])
                .sorted_unstable_by_key(|&j| rank[index_of(j)])
                .collect_vec();

            for (j, k) in higher.into_iter().tuple_combinations() {
                if !neighbors[index_of(j)].contains(&k) {
                    continue;
                }

                let triangle = Triangle::new(i, j, k);
                sets.total += 1;

                for u in triangle.nodes() {
                    sets.nodes[index_of(u)].push(triangle);
                }

                for side in triangle.sides() {
                    for edge in [side, side.reverse()] {
                        for &slot in slots.get(&edge).into_iter().flatten() {
                            sets.edges[slot].push(triangle);
                        }
                    }
                }
            }
        }

        debug!(nodes = n, triangles = sets.total, "counted triangles");
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn directed_cycle_is_a_triangle() {
        let graph = DenseMemoryGraph::from_edges([("A", "B"), ("B", "C"), ("C", "A")]);
        let metrics = GraphMetrics::new(&graph);

        for u in graph.vertices() {
            assert_eq!(metrics.number_of_triangles_of(u), 1);
        }
        for slot in graph.edge_slots() {
            assert_eq!(metrics.edge_triangles_of(slot), &[Triangle(0, 1, 2)]);
        }
        assert_eq!(metrics.number_of_triangles(), 1);
    }

    #[test]
    fn clique_of_four() {
        let mut graph = DenseMemoryGraph::new();
        graph.connect_clique([0u32, 1, 2, 3], false);
        let metrics = GraphMetrics::new(&graph);

        assert_eq!(metrics.number_of_triangles(), 4);
        for u in graph.vertices() {
            assert_eq!(metrics.number_of_triangles_of(u), 3);
        }
        for slot in graph.edge_slots() {
            assert_eq!(metrics.edge_triangles_of(slot).len(), 2);
        }
    }

    #[test]
    fn loops_and_parallel_edges() {
        let graph = DenseMemoryGraph::from_edges([
            (0u32, 1u32),
            (0, 1),
            (1, 2),
            (2, 0),
            (0, 0),
            (1, 1),
            (2, 3),
        ]);
        let metrics = GraphMetrics::new(&graph);

        assert_eq!(metrics.number_of_triangles(), 1);
        assert_eq!(metrics.number_of_triangles_of(0), 1);
        assert_eq!(metrics.number_of_triangles_of(3), 0);

        let per_edge = graph
            .edges()
            .zip(graph.edge_slots())
            .map(|(e, s)| (e, metrics.edge_triangles_of(s).len()))
            .collect_vec();
        assert_eq!(
            per_edge,
            vec![
                (Edge(0, 0), 0),
                (Edge(0, 1), 1),
                (Edge(0, 1), 1),
                (Edge(1, 1), 0),
                (Edge(1, 2), 1),
                (Edge(2, 0), 1),
                (Edge(2, 3), 0),
            ]
        );
    }

    #[test]
    fn triangles_are_symmetric_and_complete() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [10, 30] {
            for p in [0.1, 0.3] {
                let graph: DenseMemoryGraph<NumNodes> = DenseMemoryGraph::gnp(rng, n, p);
                let metrics = GraphMetrics::new(&graph);

                let adjacent = |u: NodeId, v: NodeId| metrics.neighbors_of(u).contains(&v);
                let naive = graph
                    .vertices()
                    .tuple_combinations()
                    .filter(|&(a, b, c)| adjacent(a, b) && adjacent(b, c) && adjacent(a, c))
                    .count();
                assert_eq!(metrics.number_of_triangles(), naive);

                let edges = graph.edges().collect_vec();
                for u in graph.vertices() {
                    for t in metrics.triangles_of(u) {
                        assert!(t.contains(u));
                        for corner in t.nodes() {
                            assert!(metrics.triangles_of(corner).contains(t));
                        }
                        for side in t.sides() {
                            for (slot, edge) in edges.iter().enumerate() {
                                if *edge == side || *edge == side.reverse() {
                                    assert!(metrics.edge_triangles_of(slot).contains(t));
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
