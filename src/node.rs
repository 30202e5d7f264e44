/*!
# Node Representation

Nodes carry two identities:
- an external **label** of any caller-supplied type implementing [`NodeLabel`], and
- an internal [`NodeId`]: a dense, signed 32-bit integer equal to the insertion rank of the label.

Ids are assigned monotonically and are never reused or renumbered, so `0..n` always enumerates
all nodes of a graph with `n` nodes.
*/

use std::{fmt::Debug, hash::Hash};

/// Internal node identifier. Only values in `0..n` are ever assigned.
pub type NodeId = i32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: NodeId = -1;

/// There can be at most `2^31 - 1` nodes in a graph!
pub type NumNodes = u32;

/// Requirements on the external label of a node.
///
/// Labels are hashed and compared to find their [`NodeId`]; `Debug` is only used to render
/// unknown labels in error messages.
pub trait NodeLabel: Clone + Eq + Hash + Debug {}

impl<T> NodeLabel for T where T: Clone + Eq + Hash + Debug {}

/// Converts an id into an index, panicking on negative values.
#[inline(always)]
pub(crate) fn index_of(u: NodeId) -> usize {
    debug_assert!(u >= 0, "negative node id {u}");
    u as usize
}
