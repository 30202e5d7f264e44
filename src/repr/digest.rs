/*!
# Graph Hash Digests

The [`GraphDigest`] trait hashes the structure of any [`GraphView`]:
- the number of nodes, and
- the sorted sequence of `(source, destination, weight)` triples.

Labels are not part of the digest; two graphs with equal digests answer all id-based
queries identically.

## Example
```
use flatgraphs::{prelude::*, repr::digest::GraphDigest};

let mut graph = DenseMemoryGraph::new();
graph.add_edge(4u32, 3);
graph.add_edge(1, 2);

let copy = DenseMemoryGraph::copy_from(&graph);
assert_eq!(graph.digest_sha256(), copy.digest_sha256());
assert_eq!(graph.digest_sha256().len(), 64);
```
*/

use std::fmt::LowerHex;

use super::*;
use ::digest::{Digest, Output};
use itertools::Itertools;

/// Trait for computing a **canonical hash digest** of a graph.
///
/// Edges are encoded in sorted order, so the digest does not depend on insertion order
/// or on whether the graph has been optimized.
pub trait GraphDigest {
    /// Computes a digest of the graph using the provided hash function `D`.
    ///
    /// The result is returned as a **hexadecimal string**.
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest;

    /// Computes a **SHA-256 digest** of the graph (64 hex characters).
    fn digest_sha256(&self) -> String {
        self.digest::<sha2::Sha256>()
    }
}

impl<G> GraphDigest for G
where
    G: GraphView,
{
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        let mut hasher = D::new();

        // first encode the number of nodes in the graph
        hasher.update(self.number_of_nodes().to_le_bytes());

        // then append the sorted edge list including weight bits
        let mut buffer = [0u8; 16];
        for (Edge(u, v), weight) in self
            .weighted_edges()
            .map(|(e, w)| (e, w.to_bits()))
            .sorted_unstable()
        {
            buffer[0..4].copy_from_slice(&u.to_le_bytes());
            buffer[4..8].copy_from_slice(&v.to_le_bytes());
            buffer[8..16].copy_from_slice(&weight.to_le_bytes());
            hasher.update(buffer);
        }

        format!("{:x}", hasher.finalize())
    }
}
