/*!
# Flat Edge Stores

Edges are stored as a single growable array of interleaved node-id pairs
`[src_0, dst_0, src_1, dst_1, ...]`; the weighted variant keeps a second, index-aligned array of
weights. Stores know nothing about sorting: they only offer append, pairwise swap and slot
access, which is everything the hybrid sort in [`super::sort`] needs.
*/

use super::*;

/// Storage backend of a [`MemoryGraph`].
///
/// Every permutation of slots must go through [`EdgeStore::swap_edges`] so that per-slot
/// payloads (weights) stay aligned with their edge.
pub trait EdgeStore: Clone + Default + Send + Sync {
    /// *true* if the store keeps an individual weight per slot
    const WEIGHTED: bool;

    /// Returns the number of stored edges
    fn len(&self) -> usize;

    /// Returns *true* if no edge is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the source of the edge in `slot`
    /// ** Panics if `slot >= len` **
    fn source_of(&self, slot: EdgeSlot) -> NodeId;

    /// Returns the destination of the edge in `slot`
    /// ** Panics if `slot >= len` **
    fn target_of(&self, slot: EdgeSlot) -> NodeId;

    /// Returns the edge in `slot`
    /// ** Panics if `slot >= len` **
    #[inline]
    fn endpoints(&self, slot: EdgeSlot) -> Edge {
        Edge(self.source_of(slot), self.target_of(slot))
    }

    /// Returns the weight of the edge in `slot` (`1.0` for unweighted stores)
    /// ** Panics if `slot >= len` **
    fn weight_of(&self, slot: EdgeSlot) -> f64;

    /// Appends an edge. Unweighted stores drop the weight.
    fn push_edge(&mut self, edge: Edge, weight: f64);

    /// Swaps the contents of two slots (including their weights)
    fn swap_edges(&mut self, i: EdgeSlot, j: EdgeSlot);

    /// Reserves space for at least `additional` more edges
    fn reserve(&mut self, additional: usize);

    /// Removes all edges
    fn clear(&mut self);
}

/// Unweighted store of interleaved `(source, destination)` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatEdgeStore {
    pairs: Vec<NodeId>,
}

impl FlatEdgeStore {
    /// Creates an empty store with space for `edges` edges
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(2 * edges),
        }
    }

    /// Returns the raw interleaved pair array
    pub fn as_raw_slice(&self) -> &[NodeId] {
        &self.pairs
    }
}

impl EdgeStore for FlatEdgeStore {
    const WEIGHTED: bool = false;

    #[inline]
    fn len(&self) -> usize {
        self.pairs.len() / 2
    }

    #[inline]
    fn source_of(&self, slot: EdgeSlot) -> NodeId {
        self.pairs[2 * slot]
    }

    #[inline]
    fn target_of(&self, slot: EdgeSlot) -> NodeId {
        self.pairs[2 * slot + 1]
    }

    #[inline]
    fn weight_of(&self, slot: EdgeSlot) -> f64 {
        assert!(slot < self.len());
        1.0
    }

    fn push_edge(&mut self, Edge(u, v): Edge, _weight: f64) {
        self.pairs.push(u);
        self.pairs.push(v);
    }

    #[inline]
    fn swap_edges(&mut self, i: EdgeSlot, j: EdgeSlot) {
        if i != j {
            self.pairs.swap(2 * i, 2 * j);
            self.pairs.swap(2 * i + 1, 2 * j + 1);
        }
    }

    fn reserve(&mut self, additional: usize) {
        self.pairs.reserve(2 * additional);
    }

    fn clear(&mut self) {
        self.pairs.clear();
    }
}

/// Weighted store: a [`FlatEdgeStore`] plus one weight per slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedEdgeStore {
    edges: FlatEdgeStore,
    weights: Vec<f64>,
}

impl WeightedEdgeStore {
    /// Creates an empty store with space for `edges` edges
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            edges: FlatEdgeStore::with_capacity(edges),
            weights: Vec::with_capacity(edges),
        }
    }

    /// Returns the weight array, index-aligned with the edge slots
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl EdgeStore for WeightedEdgeStore {
    const WEIGHTED: bool = true;

    #[inline]
    fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    fn source_of(&self, slot: EdgeSlot) -> NodeId {
        self.edges.source_of(slot)
    }

    #[inline]
    fn target_of(&self, slot: EdgeSlot) -> NodeId {
        self.edges.target_of(slot)
    }

    #[inline]
    fn weight_of(&self, slot: EdgeSlot) -> f64 {
        self.weights[slot]
    }

    fn push_edge(&mut self, edge: Edge, weight: f64) {
        self.edges.push_edge(edge, weight);
        self.weights.push(weight);
    }

    #[inline]
    fn swap_edges(&mut self, i: EdgeSlot, j: EdgeSlot) {
        self.edges.swap_edges(i, j);
        self.weights.swap(i, j);
    }

    fn reserve(&mut self, additional: usize) {
        self.edges.reserve(additional);
        self.weights.reserve(additional);
    }

    fn clear(&mut self) {
        self.edges.clear();
        self.weights.clear();
    }
}
