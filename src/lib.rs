/*!
`flatgraphs` stores directed multigraphs over arbitrary node labels in flat arrays and computes
structural metrics on top of them.

# Representation

Every node has an external **label** (any `Clone + Eq + Hash + Debug` type) and an internal
[`NodeId`]: a dense `i32` assigned in insertion order. Edges are kept as one growable array of
interleaved `(source, destination)` id pairs, optionally with an index-aligned array of `f64`
weights.

Insertions only append. The first query that relies on the order sorts the edge sequence by
`(source, destination)` once (an iterative randomized quicksort, see [`repr::sort_edges`]);
from then on, successor lookups are a binary search over the sorted sources. Sorting happens
behind a lock, so a shared graph can be queried from many threads at once.

### Available Representations

- [`DenseMemoryGraph`](crate::repr::DenseMemoryGraph): unweighted, every edge reports weight `1.0`
- [`WeightedDenseMemoryGraph`](crate::repr::WeightedDenseMemoryGraph): one finite weight per edge

Both are aliases of [`MemoryGraph`](crate::repr::MemoryGraph).

# Usage

There are *4* submodules you probably want to interact with besides the [`prelude`]:
- [`algo`] includes [`GraphMetrics`](crate::algo::GraphMetrics) (degrees, neighbors, triangles,
  assortativity, edge similarities, eccentricities; all memoized) and the step-wise
  [`GraphWalker`](crate::algo::GraphWalker),
- [`gens`] includes a `G(n,p)` generator and deterministic substructures such as paths/cycles/cliques,
- [`io`] saves and restores whole graphs as binary snapshots,
- [`utils`] includes deep copies of arbitrary graph views.

[`repr::digest`] computes a `Sha256`-hash of the structure of a graph.

In most use-cases, `use flatgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use flatgraphs::{prelude::*, algo::*};

let mut graph = DenseMemoryGraph::new();
graph.add_edge("A", "B");
graph.add_edge("B", "C");
graph.add_edge("C", "A");

let metrics = GraphMetrics::new(&graph);
assert_eq!(metrics.number_of_triangles(), 1);
assert_eq!(metrics.degree(&"A").unwrap(), 2);
```

# Diagnostics

The crate emits [`tracing`](https://docs.rs/tracing) events: `debug` when the edge sequence is
sorted, a metric class is computed or a snapshot is read/written, and `trace` for every walk step.
Install any subscriber to see them.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use error::*;
pub use node::*;

/// `flatgraphs::prelude` includes definitions for nodes, edges and errors, all basic graph
/// operation traits as well as both in-memory representations.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*};
}
