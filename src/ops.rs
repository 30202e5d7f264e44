use std::ops::Range;

use fxhash::FxHashSet;

use crate::*;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns the range of all node ids `0..n`.
    /// As ids are never freed, this enumerates every node of the graph.
    fn vertices(&self) -> Range<NodeId> {
        0..self.number_of_nodes() as NodeId
    }

    /// Returns *true* if `u` is a valid id of this graph
    fn has_vertex(&self, u: NodeId) -> bool {
        u >= 0 && (u as NumNodes) < self.number_of_nodes()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns the range of all edge slots `0..m`
    fn edge_slots(&self) -> Range<EdgeSlot> {
        0..self.number_of_edges()
    }

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Read-only view of a labelled directed graph.
///
/// This is the only interface the metrics engine depends on. Edge slots returned or accepted
/// by a view refer to its (lazily) sorted edge sequence.
pub trait GraphView: GraphNodeOrder + GraphEdgeOrder {
    type Label: NodeLabel;

    /// Returns the label of node `u`
    fn node_label(&self, u: NodeId) -> GraphResult<&Self::Label>;

    /// Returns the id of a label
    fn node_id(&self, label: &Self::Label) -> GraphResult<NodeId>;

    /// Returns the endpoints stored in an edge slot
    fn edge_endpoints(&self, slot: EdgeSlot) -> GraphResult<Edge>;

    /// Returns the weight stored in an edge slot. Unweighted graphs report `1.0`.
    fn edge_weight(&self, slot: EdgeSlot) -> GraphResult<f64> {
        self.edge_endpoints(slot).map(|_| 1.0)
    }

    /// Returns *true* if the graph stores individual edge weights
    fn is_weighted(&self) -> bool {
        false
    }

    /// Returns an iterator over all edges in slot order
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;

    /// Returns an iterator over all edges and their weights in slot order
    fn weighted_edges(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        self.edges().map(|e| (e, 1.0))
    }

    /// Returns the distinct destinations of all edges leaving `u`
    /// ** Panics if `u >= n` **
    fn successors_of(&self, u: NodeId) -> FxHashSet<NodeId>;

    /// Returns the labels of all distinct successors of a label
    fn successors(&self, label: &Self::Label) -> GraphResult<FxHashSet<Self::Label>> {
        let u = self.node_id(label)?;
        self.successors_of(u)
            .into_iter()
            .map(|v| self.node_label(v).cloned())
            .collect()
    }

    /// Returns the labels of all nodes in id order
    fn labels(&self) -> impl Iterator<Item = &Self::Label> + '_ {
        self.vertices().filter_map(move |u| self.node_label(u).ok())
    }
}

impl<G: GraphNodeOrder> GraphNodeOrder for &G {
    fn number_of_nodes(&self) -> NumNodes {
        (**self).number_of_nodes()
    }
}

impl<G: GraphEdgeOrder> GraphEdgeOrder for &G {
    fn number_of_edges(&self) -> NumEdges {
        (**self).number_of_edges()
    }
}

impl<G: GraphView> GraphView for &G {
    type Label = G::Label;

    fn node_label(&self, u: NodeId) -> GraphResult<&Self::Label> {
        (**self).node_label(u)
    }

    fn node_id(&self, label: &Self::Label) -> GraphResult<NodeId> {
        (**self).node_id(label)
    }

    fn edge_endpoints(&self, slot: EdgeSlot) -> GraphResult<Edge> {
        (**self).edge_endpoints(slot)
    }

    fn edge_weight(&self, slot: EdgeSlot) -> GraphResult<f64> {
        (**self).edge_weight(slot)
    }

    fn is_weighted(&self) -> bool {
        (**self).is_weighted()
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (**self).edges()
    }

    fn weighted_edges(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        (**self).weighted_edges()
    }

    fn successors_of(&self, u: NodeId) -> FxHashSet<NodeId> {
        (**self).successors_of(u)
    }
}

/// Provides functions to insert nodes and edges.
///
/// Nodes and edges can only be added; there is no deletion apart from clearing the whole graph.
pub trait GraphEdgeEditing: GraphView + Default {
    /// Adds a node and returns its id.
    /// If the label is already present, its existing id is returned and nothing changes.
    fn add_node(&mut self, label: Self::Label) -> NodeId;

    /// Adds the edge `(src, dst)`, creating unseen endpoints on the fly.
    /// Parallel edges and self-loops are kept as separate slots.
    fn add_edge(&mut self, src: Self::Label, dst: Self::Label);

    /// Adds all edges in the collection
    fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (Self::Label, Self::Label)>,
    {
        for (u, v) in edges {
            self.add_edge(u, v);
        }
    }

    /// Removes all nodes and edges
    fn clear(&mut self);
}

/// Edge insertion with an explicit weight
pub trait WeightedGraphEdgeEditing: GraphEdgeEditing {
    /// Adds the edge `(src, dst)` with the given weight.
    /// Fails with [`GraphError::InvalidWeight`] if the weight is not finite; the graph is
    /// left untouched in that case.
    fn add_weighted_edge(
        &mut self,
        src: Self::Label,
        dst: Self::Label,
        weight: f64,
    ) -> GraphResult<()>;
}

/// A super trait for creating a graph from scratch from a set of labelled edges
pub trait GraphFromScratch: GraphEdgeEditing {
    /// Create a graph from an iterator over labelled edges
    fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (Self::Label, Self::Label)>,
    {
        let mut graph = Self::default();
        graph.add_edges(edges);
        graph
    }
}

impl<G: GraphEdgeEditing> GraphFromScratch for G {}
