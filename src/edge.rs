use std::fmt::{Debug, Display};

use crate::node::*;

/// An edge is defined by its source and its destination.
///
/// The derived ordering compares the source first and breaks ties on the destination,
/// which is exactly the order the lazy sort of a graph establishes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub NodeId, pub NodeId);

/// Position of an edge in the flat edge sequence of a graph.
/// Slots are only stable once the graph has been optimized (sorted).
pub type EdgeSlot = usize;

/// Number of edges (and degrees, which count edge endpoints).
pub type NumEdges = usize;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Returns the source of the edge
    #[inline]
    pub fn source(&self) -> NodeId {
        self.0
    }

    /// Returns the destination of the edge
    #[inline]
    pub fn target(&self) -> NodeId {
        self.1
    }

    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from(value: (NodeId, NodeId)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(NodeId, NodeId)> for Edge {
    fn from(value: &(NodeId, NodeId)) -> Self {
        Edge(value.0, value.1)
    }
}

/// Three mutually adjacent nodes, stored in ascending order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triangle(pub NodeId, pub NodeId, pub NodeId);

impl Triangle {
    /// Creates the normalized triangle over the three nodes
    pub fn new(a: NodeId, b: NodeId, c: NodeId) -> Self {
        let mut nodes = [a, b, c];
        nodes.sort_unstable();
        Triangle(nodes[0], nodes[1], nodes[2])
    }

    /// Returns the nodes of the triangle in ascending order
    pub fn nodes(&self) -> [NodeId; 3] {
        [self.0, self.1, self.2]
    }

    /// Returns *true* if `u` is one of the corners
    pub fn contains(&self, u: NodeId) -> bool {
        self.0 == u || self.1 == u || self.2 == u
    }

    /// Returns the three (normalized) node pairs spanning the triangle
    pub fn sides(&self) -> [Edge; 3] {
        [
            Edge(self.0, self.1),
            Edge(self.1, self.2),
            Edge(self.0, self.2),
        ]
    }
}

impl Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{},{},{}}}", self.0, self.1, self.2)
    }
}

impl Debug for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}
