use std::fmt::Debug;

use fxhash::FxHashSet;
use itertools::Either;

use super::*;

/// An in-memory graph in either representation
pub enum AnyDenseGraph<N> {
    Unweighted(DenseMemoryGraph<N>),
    Weighted(WeightedDenseMemoryGraph<N>),
}

impl<N: NodeLabel> Clone for AnyDenseGraph<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Unweighted(graph) => Self::Unweighted(graph.clone()),
            Self::Weighted(graph) => Self::Weighted(graph.clone()),
        }
    }
}

impl<N: NodeLabel> Debug for AnyDenseGraph<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unweighted(graph) => f.debug_tuple("Unweighted").field(graph).finish(),
            Self::Weighted(graph) => f.debug_tuple("Weighted").field(graph).finish(),
        }
    }
}

/// Deep copy of any graph view into memory.
///
/// Nodes are inserted in id order, so ids are preserved; edges are copied in slot order.
///
/// # Example
/// ```
/// use flatgraphs::{prelude::*, utils::*};
///
/// let mut graph = WeightedDenseMemoryGraph::new();
/// graph.add_weighted_edge("a", "b", 0.5).unwrap();
///
/// let copy = graph.deep_copy();
/// assert!(matches!(copy, AnyDenseGraph::Weighted(_)));
/// assert_eq!(copy.edge_weight(0).unwrap(), 0.5);
/// ```
pub trait GraphCopy: GraphView {
    /// Returns an equivalent graph that is weighted iff `self` is
    fn deep_copy(&self) -> AnyDenseGraph<Self::Label>;
}

impl<G: GraphView> GraphCopy for G {
    fn deep_copy(&self) -> AnyDenseGraph<Self::Label> {
        if self.is_weighted() {
            AnyDenseGraph::Weighted(MemoryGraph::copy_from(self))
        } else {
            AnyDenseGraph::Unweighted(MemoryGraph::copy_from(self))
        }
    }
}

impl<N> From<DenseMemoryGraph<N>> for AnyDenseGraph<N> {
    fn from(graph: DenseMemoryGraph<N>) -> Self {
        Self::Unweighted(graph)
    }
}

impl<N> From<WeightedDenseMemoryGraph<N>> for AnyDenseGraph<N> {
    fn from(graph: WeightedDenseMemoryGraph<N>) -> Self {
        Self::Weighted(graph)
    }
}

macro_rules! on_variant {
    ($self:ident, $graph:ident => $body:expr) => {
        match $self {
            AnyDenseGraph::Unweighted($graph) => $body,
            AnyDenseGraph::Weighted($graph) => $body,
        }
    };
}

impl<N: NodeLabel> GraphNodeOrder for AnyDenseGraph<N> {
    fn number_of_nodes(&self) -> NumNodes {
        on_variant!(self, g => g.number_of_nodes())
    }
}

impl<N: NodeLabel> GraphEdgeOrder for AnyDenseGraph<N> {
    fn number_of_edges(&self) -> NumEdges {
        on_variant!(self, g => g.number_of_edges())
    }
}

impl<N: NodeLabel> GraphView for AnyDenseGraph<N> {
    type Label = N;

    fn node_label(&self, u: NodeId) -> GraphResult<&N> {
        on_variant!(self, g => g.node_label(u))
    }

    fn node_id(&self, label: &N) -> GraphResult<NodeId> {
        on_variant!(self, g => g.node_id(label))
    }

    fn edge_endpoints(&self, slot: EdgeSlot) -> GraphResult<Edge> {
        on_variant!(self, g => g.edge_endpoints(slot))
    }

    fn edge_weight(&self, slot: EdgeSlot) -> GraphResult<f64> {
        on_variant!(self, g => g.edge_weight(slot))
    }

    fn is_weighted(&self) -> bool {
        matches!(self, Self::Weighted(_))
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        match self {
            Self::Unweighted(g) => Either::Left(g.edges()),
            Self::Weighted(g) => Either::Right(g.edges()),
        }
    }

    fn weighted_edges(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        match self {
            Self::Unweighted(g) => Either::Left(g.weighted_edges()),
            Self::Weighted(g) => Either::Right(g.weighted_edges()),
        }
    }

    fn successors_of(&self, u: NodeId) -> FxHashSet<NodeId> {
        on_variant!(self, g => g.successors_of(u))
    }
}
