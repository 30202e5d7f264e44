use itertools::Itertools;

use super::*;

/// Deterministic substructures over labelled nodes; unseen labels become new nodes.
///
/// # Example
/// ```rust
/// use flatgraphs::{prelude::*, gens::*};
///
/// let mut graph = DenseMemoryGraph::new();
/// graph.connect_cycle(["a", "b", "c"]);
/// graph.connect_star("hub", ["a", "b"]);
///
/// assert_eq!(graph.number_of_nodes(), 4);
/// assert_eq!(graph.number_of_edges(), 5);
/// ```
pub trait GeneratorSubstructures: GraphEdgeEditing {
    /// Connects consecutive nodes by an edge `(prev, next)`.
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Self::Label>;

    /// Connects the nodes by a **path** and closes it with an edge from the last node back to
    /// the first one.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Self::Label>;

    /// Adds an edge from `center` to every leaf.
    fn connect_star<L>(&mut self, center: Self::Label, leaves: L)
    where
        L: IntoIterator<Item = Self::Label>;

    /// Connects every pair of given nodes once, from the earlier to the later node.
    /// If `with_loops` is `true`, each node also gets a self-loop.
    fn connect_clique<C>(&mut self, nodes: C, with_loops: bool)
    where
        C: IntoIterator<Item = Self::Label>;
}

impl<G> GeneratorSubstructures for G
where
    G: GraphEdgeEditing,
{
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Self::Label>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.add_edge(u, v);
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Self::Label>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        if let Some(first) = iter.next() {
            let mut prev = first.clone();
            for cur in iter {
                self.add_edge(prev, cur.clone());
                prev = cur;
            }
            self.add_edge(prev, first);
        }
    }

    fn connect_star<L>(&mut self, center: Self::Label, leaves: L)
    where
        L: IntoIterator<Item = Self::Label>,
    {
        self.add_node(center.clone());
        for leaf in leaves {
            self.add_edge(center.clone(), leaf);
        }
    }

    fn connect_clique<C>(&mut self, nodes: C, with_loops: bool)
    where
        C: IntoIterator<Item = Self::Label>,
    {
        let nodes = nodes.into_iter().collect_vec();
        for (i, u) in nodes.iter().enumerate() {
            self.add_node(u.clone());
            if with_loops {
                self.add_edge(u.clone(), u.clone());
            }
            for v in &nodes[i + 1..] {
                self.add_edge(u.clone(), v.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_and_cycle() {
        let mut graph = DenseMemoryGraph::new();
        graph.connect_path(0u32..4);
        assert_eq!(
            graph.edges().collect_vec(),
            vec![Edge(0, 1), Edge(1, 2), Edge(2, 3)]
        );

        graph.connect_cycle([7u32]);
        assert_eq!(graph.number_of_nodes(), 5);
        assert!(graph.edges().any(|e| e == Edge(4, 4)));

        let mut cycle = DenseMemoryGraph::new();
        cycle.connect_cycle(["x", "y", "z"]);
        assert_eq!(
            cycle.edges().collect_vec(),
            vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)]
        );
    }

    #[test]
    fn star_and_clique() {
        let mut graph = DenseMemoryGraph::new();
        graph.connect_star('c', Vec::new());
        assert_eq!(graph.number_of_nodes(), 1);
        graph.connect_star('c', ['a', 'b']);
        assert_eq!(graph.successors_of(0).len(), 2);

        let mut clique = DenseMemoryGraph::new();
        clique.connect_clique(0u32..5, false);
        assert_eq!(clique.number_of_edges(), 10);

        let mut looped = DenseMemoryGraph::new();
        looped.connect_clique(0u32..5, true);
        assert_eq!(looped.number_of_edges(), 15);
        assert_eq!(looped.edges().filter(|e| e.is_loop()).count(), 5);
    }
}
