//! B-tree node and entry types.
//!
//! # Node Layout
//! ```text
//! Internal node (n entries, n+1 children):
//! ┌──────────────────────────────────────────────┐
//! │  entries:   [ e0 ]  [ e1 ]  ...  [ en-1 ]    │
//! │  children: [c0] [c1] [c2]  ...  [cn-1] [cn]  │
//! └──────────────────────────────────────────────┘
//!         keys(c0) < e0.key < keys(c1) < e1.key < ...
//!
//! Leaf node: entries only, children is empty.
//! ```
//!
//! Nodes own their children as `Box`es, so moving an entry or a subtree is
//! a pointer move and never clones a record payload.

use crate::common::ContactId;

/// A single (key, record) pair stored in a node.
///
/// The index orders entries by `key` alone; records are never compared.
#[derive(Debug)]
pub(crate) struct Entry<R> {
    pub(crate) key: ContactId,
    pub(crate) record: R,
}

impl<R> Entry<R> {
    pub(crate) fn new(key: ContactId, record: R) -> Self {
        Self { key, record }
    }
}

/// One node of the B-tree.
///
/// Entry counts are bounded by the tree's minimum degree `t`:
/// - non-root nodes hold between `t - 1` and `2t - 1` entries
/// - the root holds between 0 and `2t - 1` entries
/// - an internal node with `n` entries has exactly `n + 1` children
#[derive(Debug)]
pub(crate) struct Node<R> {
    pub(crate) entries: Vec<Entry<R>>,
    pub(crate) children: Vec<Box<Node<R>>>,
    pub(crate) leaf: bool,
}

impl<R> Node<R> {
    pub(crate) fn new(leaf: bool) -> Self {
        Self {
            entries: Vec::new(),
            children: Vec::new(),
            leaf,
        }
    }

    /// Index of the first entry whose key is >= `key`.
    ///
    /// Returns `entries.len()` when every key is smaller. For a miss this
    /// is also the child slot to descend into.
    pub(crate) fn lower_bound(&self, key: ContactId) -> usize {
        self.entries
            .binary_search_by_key(&key, |entry| entry.key)
            .unwrap_or_else(|slot| slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_with_keys(keys: &[u64]) -> Node<u64> {
        let mut node = Node::new(true);
        for &k in keys {
            node.entries.push(Entry::new(ContactId::new(k), k));
        }
        node
    }

    #[test]
    fn test_new_leaf_is_empty() {
        let node: Node<u64> = Node::new(true);
        assert!(node.leaf);
        assert!(node.entries.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_lower_bound_hit() {
        let node = leaf_with_keys(&[10, 20, 30]);
        assert_eq!(node.lower_bound(ContactId::new(10)), 0);
        assert_eq!(node.lower_bound(ContactId::new(20)), 1);
        assert_eq!(node.lower_bound(ContactId::new(30)), 2);
    }

    #[test]
    fn test_lower_bound_miss() {
        let node = leaf_with_keys(&[10, 20, 30]);
        assert_eq!(node.lower_bound(ContactId::new(5)), 0);
        assert_eq!(node.lower_bound(ContactId::new(15)), 1);
        assert_eq!(node.lower_bound(ContactId::new(25)), 2);
        assert_eq!(node.lower_bound(ContactId::new(99)), 3);
    }

    #[test]
    fn test_lower_bound_empty() {
        let node: Node<u64> = Node::new(true);
        assert_eq!(node.lower_bound(ContactId::new(1)), 0);
    }
}
