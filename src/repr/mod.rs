/*!
# Graph Representation

Graphs are stored as a [`NodeIndex`] (label <-> id) plus a flat [`EdgeStore`]:

- [`DenseMemoryGraph`] keeps only the interleaved `(source, destination)` pairs,
- [`WeightedDenseMemoryGraph`] additionally keeps one `f64` per edge slot.

Both are aliases of [`MemoryGraph`], which owns the lazy sort (see [`sort_edges`]) and the
binary-search adjacency lookup. [`digest`] computes representation independent hashes.
*/

use crate::{ops::*, *};

mod dense;
mod edge_store;
mod node_index;
mod sort;

pub mod digest;

pub use dense::*;
pub use edge_store::*;
pub use node_index::*;
pub use sort::*;
