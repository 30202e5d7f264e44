/*!
# Graph Generators

Builders for random edge streams and helpers that connect labelled nodes into fixed substructures.

The typical workflow for random graphs is
1. create a generator instance (e.g., `Gnp::new()`),
2. set parameters using the builder methods (e.g., `.nodes(n).prob(p)`),
3. generate edges via `generate()` or `stream()`.

[`RandomGraph`] wraps this into constructors for every graph type whose labels can be built from
a [`NumNodes`]: node `i` gets label `i` and thus id `i`.

```
use flatgraphs::{prelude::*, gens::*};
use rand::SeedableRng;

let rng = &mut rand_pcg::Pcg64Mcg::seed_from_u64(1);
let graph: DenseMemoryGraph<u32> = DenseMemoryGraph::gnp_no_loops(rng, 100, 0.05);

assert_eq!(graph.number_of_nodes(), 100);
assert!(graph.edges().all(|e| !e.is_loop()));
```
*/

use rand::Rng;

use crate::prelude::*;

mod gnp;
mod substructures;

pub use gnp::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// Trait for generators that allow setting the average degree.
pub trait AverageDegreeGen {
    /// Set the average degree of this generator.
    fn avg_deg(self, deg: f64) -> Self;
}

/// General trait for a configurable random edge generator over the ids `0..n`.
pub trait GraphGenerator {
    /// Generates a list of random edges.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;
}

/// Trait for building full graph instances from random models.
pub trait RandomGraph: Sized {
    /// Creates a random directed `G(n,p)` graph; self-loops are possible.
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng;

    /// Creates a directed `G(n,p)` graph with no self-loops.
    fn gnp_no_loops<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphEdgeEditing,
    G::Label: From<NumNodes>,
{
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        from_id_edges(n, Gnp::new().nodes(n).prob(p).stream(rng))
    }

    fn gnp_no_loops<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        from_id_edges(
            n,
            Gnp::new()
                .nodes(n)
                .prob(p)
                .stream(rng)
                .filter(|e| !e.is_loop()),
        )
    }
}

/// Inserts the labels `0..n` in order (so that ids equal labels) and then all edges
fn from_id_edges<G, I>(n: NumNodes, edges: I) -> G
where
    G: GraphEdgeEditing,
    G::Label: From<NumNodes>,
    I: IntoIterator<Item = Edge>,
{
    let mut graph = G::default();
    for u in 0..n {
        graph.add_node(G::Label::from(u));
    }
    for Edge(u, v) in edges {
        graph.add_edge(
            G::Label::from(u as NumNodes),
            G::Label::from(v as NumNodes),
        );
    }
    graph
}
