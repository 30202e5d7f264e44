//! Error type shared by all fallible operations of the crate.

use thiserror::Error;

use crate::{edge::*, node::*};

/// Errors that can occur when querying, walking or persisting a graph
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Unknown node label {0}")]
    UnknownNode(String),

    #[error("Node id {node} is out of range (graph has {number_of_nodes} nodes)")]
    NodeOutOfRange {
        node: NodeId,
        number_of_nodes: NumNodes,
    },

    #[error("Edge slot {slot} is out of range (graph has {number_of_edges} edges)")]
    EdgeOutOfRange {
        slot: EdgeSlot,
        number_of_edges: NumEdges,
    },

    #[error("Edge weight {0} is not finite")]
    InvalidWeight(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Reading or writing a snapshot failed; wraps the underlying IO cause
    #[error("Storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

impl GraphError {
    /// Shorthand for an [`GraphError::UnknownNode`] error of a label
    pub fn unknown_node<L: std::fmt::Debug>(label: &L) -> Self {
        GraphError::UnknownNode(format!("{label:?}"))
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
