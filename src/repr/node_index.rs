use std::collections::hash_map::Entry;

use fxhash::FxHashMap;

use super::*;

/// Bidirectional map between node labels and dense ids assigned in insertion order.
///
/// Ids are permanent: inserting a known label returns its existing id, and only
/// [`NodeIndex::clear`] forgets assignments.
#[derive(Debug, Clone)]
pub struct NodeIndex<N> {
    labels: Vec<N>,
    ids: FxHashMap<N, NodeId>,
}

impl<N> Default for NodeIndex<N> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            ids: FxHashMap::default(),
        }
    }
}

impl<N: NodeLabel> NodeIndex<N> {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index with space for `n` labels
    pub fn with_capacity(n: usize) -> Self {
        Self {
            labels: Vec::with_capacity(n),
            ids: FxHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    /// Returns the id of `label`, assigning the next free id if it is new.
    /// ** Panics if more than `NodeId::MAX` labels are inserted **
    pub fn insert(&mut self, label: N) -> NodeId {
        match self.ids.entry(label) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                assert!(
                    self.labels.len() < NodeId::MAX as usize,
                    "node ids are exhausted"
                );
                let id = self.labels.len() as NodeId;
                self.labels.push(entry.key().clone());
                entry.insert(id);
                id
            }
        }
    }

    /// Returns the id of `label` if present
    pub fn id_of(&self, label: &N) -> Option<NodeId> {
        self.ids.get(label).copied()
    }

    /// Returns the label of id `u` if present
    pub fn label_of(&self, u: NodeId) -> Option<&N> {
        usize::try_from(u).ok().and_then(|u| self.labels.get(u))
    }

    /// Returns all labels in id order
    pub fn labels(&self) -> &[N] {
        &self.labels
    }

    /// Returns the number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns *true* if no label is stored
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Forgets all labels
    pub fn clear(&mut self) {
        self.labels.clear();
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_is_idempotent() {
        let mut index = NodeIndex::new();
        assert_eq!(index.insert("a"), 0);
        assert_eq!(index.insert("b"), 1);
        assert_eq!(index.insert("a"), 0);
        assert_eq!(index.len(), 2);

        assert_eq!(index.id_of(&"b"), Some(1));
        assert_eq!(index.id_of(&"c"), None);
        assert_eq!(index.label_of(1), Some(&"b"));
        assert_eq!(index.label_of(2), None);
        assert_eq!(index.label_of(-1), None);
        assert_eq!(index.labels(), &["a", "b"]);
    }

    #[test]
    fn clear_restarts_ids() {
        let mut index = NodeIndex::with_capacity(4);
        index.insert(10u64);
        index.insert(20);
        index.clear();

        assert!(index.is_empty());
        assert_eq!(index.insert(20), 0);
    }
}
