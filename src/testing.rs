/// Every graph should pass the checks of the traits it implements
macro_rules! test_graph_ops {
    ($env:ident, $graph:ty, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{prelude::*, testing::test_graph_ops};
            use fxhash::FxHashSet;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            /// Creates `m` random edges (with repetitions and loops) between nodes `0..n`
            fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges) -> Vec<Edge> {
                (0..m)
                    .map(|_| {
                        Edge(
                            rng.random_range(0..n) as NodeId,
                            rng.random_range(0..n) as NodeId,
                        )
                    })
                    .collect_vec()
            }

            fn label(u: NumNodes) -> <$graph as GraphView>::Label {
                u.into()
            }

            /// Builds a graph whose label `i` has id `i`
            fn build(n: NumNodes, edges: &[Edge]) -> $graph {
                let mut graph = <$graph>::new();
                for u in 0..n {
                    graph.add_node(label(u));
                }
                for &Edge(u, v) in edges {
                    graph.add_edge(label(u as NumNodes), label(v as NumNodes));
                }
                graph
            }

            $(
                test_graph_ops!($graph: $trait);
            )*
        }
    };
    ($graph:ty: GraphView) => {
        #[test]
        fn graph_view() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [1 as NumNodes, 10, 50] {
                for m in [0, n as NumEdges, 5 * n as NumEdges] {
                    let edges = random_edges(rng, n, m);
                    let graph = build(n, &edges);

                    assert_eq!(graph.number_of_nodes(), n);
                    assert_eq!(graph.number_of_edges(), m);
                    assert_eq!(graph.vertices().len(), n as usize);

                    let mut sorted = edges.clone();
                    sorted.sort_unstable();
                    assert_eq!(graph.edges().collect_vec(), sorted);

                    for (slot, &edge) in sorted.iter().enumerate() {
                        assert_eq!(graph.edge_endpoints(slot).unwrap(), edge);
                    }
                    assert!(matches!(
                        graph.edge_endpoints(m),
                        Err(GraphError::EdgeOutOfRange { .. })
                    ));

                    for u in graph.vertices() {
                        let naive: FxHashSet<NodeId> = edges
                            .iter()
                            .filter(|e| e.source() == u)
                            .map(|e| e.target())
                            .collect();
                        assert_eq!(graph.successors_of(u), naive);

                        let label = graph.node_label(u).unwrap().clone();
                        assert_eq!(graph.node_id(&label).unwrap(), u);
                        assert_eq!(
                            graph.successors(&label).unwrap(),
                            naive
                                .iter()
                                .map(|&v| graph.node_label(v).unwrap().clone())
                                .collect::<FxHashSet<_>>()
                        );
                    }

                    assert!(matches!(
                        graph.node_label(n as NodeId),
                        Err(GraphError::NodeOutOfRange { .. })
                    ));
                    assert_eq!(graph.labels().count(), n as usize);
                }
            }
        }
    };
    ($graph:ty: GraphEdgeEditing) => {
        #[test]
        fn graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for n in [2 as NumNodes, 20, 40] {
                let edges = random_edges(rng, n, 3 * n as NumEdges);
                let mut graph = build(n, &edges);

                for u in 0..n {
                    assert_eq!(graph.add_node(label(u)), u as NodeId);
                }
                assert_eq!(graph.number_of_nodes(), n);
                assert_eq!(graph.number_of_edges(), edges.len());

                graph.add_edge(label(n + 1), label(0));
                assert_eq!(graph.number_of_nodes(), n + 1);
                assert_eq!(graph.node_id(&label(n + 1)).unwrap(), n as NodeId);
                assert!(graph.successors_of(n as NodeId).contains(&0));

                graph.add_edge(label(0), label(0));
                graph.add_edge(label(0), label(0));
                assert_eq!(graph.number_of_edges(), edges.len() + 3);
                assert_eq!(
                    graph.edges().filter(|&e| e == Edge(0, 0)).count(),
                    edges.iter().filter(|&&e| e == Edge(0, 0)).count() + 2
                );

                graph.clear();
                assert!(graph.is_empty());
                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.edges().count(), 0);
                assert!(graph.node_id(&label(0)).is_err());
            }
        }
    };
    ($graph:ty: WeightedGraphEdgeEditing) => {
        #[test]
        fn weighted_graph_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(7);

            for n in [3 as NumNodes, 25] {
                let edges = random_edges(rng, n, 4 * n as NumEdges);
                let mut graph = <$graph>::new();

                let mut inserted = Vec::with_capacity(edges.len());
                for (i, &Edge(u, v)) in edges.iter().enumerate() {
                    let weight = i as f64 - 0.5 * n as f64;
                    graph
                        .add_weighted_edge(label(u as NumNodes), label(v as NumNodes), weight)
                        .unwrap();
                    let edge = Edge(
                        graph.node_id(&label(u as NumNodes)).unwrap(),
                        graph.node_id(&label(v as NumNodes)).unwrap(),
                    );
                    inserted.push((edge, weight));
                }

                assert!(graph.is_weighted());
                assert!(matches!(
                    graph.add_weighted_edge(label(0), label(1), f64::NAN),
                    Err(GraphError::InvalidWeight(_))
                ));
                assert_eq!(graph.number_of_edges(), edges.len());

                let stored = graph.weighted_edges().collect_vec();
                assert!(stored.iter().tuple_windows().all(|(a, b)| a.0 <= b.0));

                let key = |&(edge, weight): &(Edge, f64)| (edge, weight.to_bits());
                let mut stored = stored.iter().map(key).collect_vec();
                let mut inserted = inserted.iter().map(key).collect_vec();
                stored.sort_unstable();
                inserted.sort_unstable();
                assert_eq!(stored, inserted);

                for slot in graph.edge_slots() {
                    let edge = graph.edge_endpoints(slot).unwrap();
                    let weight = graph.edge_weight(slot).unwrap();
                    assert!(inserted.contains(&(edge, weight.to_bits())));
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
