//! Index statistics tracking.

use std::fmt;

/// Structural-change counters for a B-tree index.
///
/// Every mutation of the index goes through `&mut self`, so plain integers
/// are enough here; there is no concurrent access to guard against.
///
/// # Example
/// ```
/// use rolodb::{BTreeIndex, ContactId};
///
/// let mut index = BTreeIndex::new(2).unwrap();
/// for id in 0..10 {
///     index.insert(ContactId::new(id), id).unwrap();
/// }
/// assert!(index.stats().splits > 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of node splits performed during inserts.
    pub splits: u64,

    /// Number of node merges performed during deletes.
    pub merges: u64,

    /// Number of entry rotations between siblings during deletes.
    pub rotations: u64,
}

impl IndexStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of structural changes.
    pub fn total_rebalances(&self) -> u64 {
        self.splits + self.merges + self.rotations
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndexStats {{ splits: {}, merges: {}, rotations: {} }}",
            self.splits, self.merges, self.rotations
        )
    }
}
