//! B-tree ordered index keyed by [`ContactId`].
//!
//! Classic CLRS B-tree with a minimum degree `t`. All mutations are
//! single-pass: inserts split every full node on the way down, deletes top
//! up every minimal node on the way down. A node is therefore never revisited
//! to fix an overflow or underflow after the fact.
//!
//! # Splitting (insert path)
//! ```text
//!        [ .. P .. ]                      [ .. P  M  .. ]
//!             │              split              │  │
//!      [a b c M d e f]       ──────►      [a b c]  [d e f]
//!        (full child)                     (median M moves up)
//! ```
//!
//! # Merging (delete path)
//! ```text
//!      [ .. P  S  Q .. ]                  [ .. P  Q .. ]
//!           │  │  │          merge             │  │
//!       [a b] │ [c d]        ──────►       [a b S c d]
//!             └── separator S moves down between the siblings
//! ```
//!
//! The root is the only node allowed to underflow; the tree grows by one
//! level exactly when the root splits and shrinks by one level exactly when
//! the root empties out.

use crate::common::config::MIN_DEGREE_FLOOR;
use crate::common::{ContactId, Error, Result};
use crate::index::node::{Entry, Node};
use crate::index::stats::IndexStats;

/// An ordered index from [`ContactId`] to a record payload.
///
/// Records move between nodes by ownership transfer; the index never clones
/// a payload, so `R` needs no trait bounds.
///
/// # Example
/// ```
/// use rolodb::{BTreeIndex, ContactId};
///
/// let mut index = BTreeIndex::new(3).unwrap();
/// index.insert(ContactId::new(7), "Pat").unwrap();
/// assert_eq!(index.search(ContactId::new(7)), Some(&"Pat"));
/// assert_eq!(index.search(ContactId::new(8)), None);
/// ```
#[derive(Debug)]
pub struct BTreeIndex<R> {
    root: Box<Node<R>>,
    min_degree: usize,
    len: usize,
    stats: IndexStats,
}

impl<R> BTreeIndex<R> {
    /// Create an empty index with the given minimum degree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDegree`] if `min_degree` is below 2.
    pub fn new(min_degree: usize) -> Result<Self> {
        if min_degree < MIN_DEGREE_FLOOR {
            return Err(Error::InvalidDegree(min_degree));
        }
        Ok(Self {
            root: Box::new(Node::new(true)),
            min_degree,
            len: 0,
            stats: IndexStats::new(),
        })
    }

    /// Number of entries in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The minimum degree `t` this index was created with.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Structural-change counters accumulated since creation.
    #[inline]
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Number of edges from the root down to any leaf.
    ///
    /// An empty index has height 0 (the root is a leaf). Every leaf sits at
    /// the same depth, so following first children measures the whole tree.
    pub fn height(&self) -> usize {
        let mut node = self.root.as_ref();
        let mut height = 0;
        while !node.leaf {
            node = &node.children[0];
            height += 1;
        }
        height
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Look up the record stored under `key`.
    ///
    /// Walks one root-to-leaf path, binary searching within each node.
    pub fn search(&self, key: ContactId) -> Option<&R> {
        let mut node = self.root.as_ref();
        loop {
            let slot = node.lower_bound(key);
            if slot < node.entries.len() && node.entries[slot].key == key {
                return Some(&node.entries[slot].record);
            }
            if node.leaf {
                return None;
            }
            node = &node.children[slot];
        }
    }

    /// All entries with keys in the inclusive range `[lo, hi]`, ascending.
    ///
    /// Subtrees that cannot contain an in-range key are never visited.
    /// An inverted range (`lo > hi`) yields no entries.
    ///
    /// # Example
    /// ```
    /// use rolodb::{BTreeIndex, ContactId};
    ///
    /// let mut index = BTreeIndex::new(3).unwrap();
    /// for id in [1u64, 3, 5, 7] {
    ///     index.insert(ContactId::new(id), id).unwrap();
    /// }
    /// let hits: Vec<u64> = index
    ///     .range(ContactId::new(2), ContactId::new(6))
    ///     .into_iter()
    ///     .map(|(id, _)| id.0)
    ///     .collect();
    /// assert_eq!(hits, vec![3, 5]);
    /// ```
    pub fn range(&self, lo: ContactId, hi: ContactId) -> Vec<(ContactId, &R)> {
        let mut out = Vec::new();
        if lo <= hi {
            Self::collect_range(&self.root, lo, hi, &mut out);
        }
        out
    }

    /// All entries in ascending key order.
    pub fn traverse(&self) -> Vec<(ContactId, &R)> {
        let mut out = Vec::with_capacity(self.len);
        Self::collect_all(&self.root, &mut out);
        out
    }

    fn collect_range<'a>(
        node: &'a Node<R>,
        lo: ContactId,
        hi: ContactId,
        out: &mut Vec<(ContactId, &'a R)>,
    ) {
        // children[slot] is the leftmost subtree that can hold keys >= lo
        let mut slot = node.lower_bound(lo);
        if node.leaf {
            while slot < node.entries.len() && node.entries[slot].key <= hi {
                out.push((node.entries[slot].key, &node.entries[slot].record));
                slot += 1;
            }
            return;
        }
        loop {
            Self::collect_range(&node.children[slot], lo, hi, out);
            if slot == node.entries.len() || node.entries[slot].key > hi {
                return;
            }
            out.push((node.entries[slot].key, &node.entries[slot].record));
            slot += 1;
        }
    }

    fn collect_all<'a>(node: &'a Node<R>, out: &mut Vec<(ContactId, &'a R)>) {
        if node.leaf {
            for entry in &node.entries {
                out.push((entry.key, &entry.record));
            }
            return;
        }
        for (slot, entry) in node.entries.iter().enumerate() {
            Self::collect_all(&node.children[slot], out);
            out.push((entry.key, &entry.record));
        }
        Self::collect_all(&node.children[node.entries.len()], out);
    }

    // ========================================================================
    // Insert
    // ========================================================================

    /// Insert a record under `key`.
    ///
    /// Splits full nodes on the way down, so the recursion never enters a
    /// node that cannot absorb one more entry. The root split here is the
    /// only way the tree gains height.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if `key` is already present. The
    /// index is left untouched in that case.
    pub fn insert(&mut self, key: ContactId, record: R) -> Result<()> {
        if self.search(key).is_some() {
            return Err(Error::DuplicateKey(key));
        }

        let t = self.min_degree;
        if self.root.entries.len() == self.max_entries() {
            // old root becomes the sole child of a fresh root, then splits
            let old_root = std::mem::replace(&mut self.root, Box::new(Node::new(false)));
            self.root.children.push(old_root);
            Self::split_child(&mut self.root, t, 0, &mut self.stats);
        }

        Self::insert_non_full(&mut self.root, t, Entry::new(key, record), &mut self.stats);
        self.len += 1;
        Ok(())
    }

    /// Bulk-insert records, returning how many were added.
    ///
    /// # Errors
    /// Stops at the first duplicate key and returns [`Error::DuplicateKey`];
    /// records before the offending one remain inserted.
    pub fn load<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = (ContactId, R)>,
    {
        let mut loaded = 0;
        for (key, record) in records {
            self.insert(key, record)?;
            loaded += 1;
        }
        Ok(loaded)
    }

    fn insert_non_full(node: &mut Node<R>, t: usize, entry: Entry<R>, stats: &mut IndexStats) {
        let mut slot = node.lower_bound(entry.key);

        if node.leaf {
            node.entries.insert(slot, entry);
            return;
        }

        if node.children[slot].entries.len() == 2 * t - 1 {
            Self::split_child(node, t, slot, stats);
            // the promoted median now sits at `slot`; step past it if the
            // new entry belongs in the right half
            debug_assert_ne!(node.entries[slot].key, entry.key);
            if entry.key > node.entries[slot].key {
                slot += 1;
            }
        }
        Self::insert_non_full(&mut node.children[slot], t, entry, stats);
    }

    /// Split the full child at `slot`, promoting its median into `parent`.
    ///
    /// The child keeps its lower `t - 1` entries, a new right sibling takes
    /// the upper `t - 1`, and the median lands in `parent` at `slot`.
    fn split_child(parent: &mut Node<R>, t: usize, slot: usize, stats: &mut IndexStats) {
        let child = &mut parent.children[slot];
        debug_assert_eq!(child.entries.len(), 2 * t - 1);

        let mut right = Box::new(Node::new(child.leaf));
        right.entries = child.entries.split_off(t);
        let median = match child.entries.pop() {
            Some(entry) => entry,
            None => unreachable!("a full node always has a median entry"),
        };
        if !child.leaf {
            right.children = child.children.split_off(t);
        }

        parent.entries.insert(slot, median);
        parent.children.insert(slot + 1, right);
        stats.splits += 1;
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// Remove the entry stored under `key`, returning its record.
    ///
    /// Returns `None` when the key is absent. Descent may still rebalance
    /// nodes along the way in that case; the key set is unchanged.
    ///
    /// # Example
    /// ```
    /// use rolodb::{BTreeIndex, ContactId};
    ///
    /// let mut index = BTreeIndex::new(3).unwrap();
    /// index.insert(ContactId::new(1), "Sam").unwrap();
    /// assert_eq!(index.delete(ContactId::new(1)), Some("Sam"));
    /// assert_eq!(index.delete(ContactId::new(1)), None);
    /// ```
    pub fn delete(&mut self, key: ContactId) -> Option<R> {
        let removed = Self::remove_rec(&mut self.root, self.min_degree, key, &mut self.stats);
        if removed.is_some() {
            self.len -= 1;
        }

        // the lone child replaces an emptied internal root; this is the
        // only way the tree loses height
        if !self.root.leaf && self.root.entries.is_empty() {
            self.root = self.root.children.remove(0);
        }

        removed.map(|entry| entry.record)
    }

    fn remove_rec(
        node: &mut Node<R>,
        t: usize,
        key: ContactId,
        stats: &mut IndexStats,
    ) -> Option<Entry<R>> {
        let slot = node.lower_bound(key);
        let hit = slot < node.entries.len() && node.entries[slot].key == key;

        if node.leaf {
            if hit {
                return Some(node.entries.remove(slot));
            }
            return None;
        }

        if hit {
            // replace the entry with its in-order neighbor when a flanking
            // subtree can spare one, otherwise merge the flanks and recurse
            if node.children[slot].entries.len() >= t {
                let pred = Self::take_max(&mut node.children[slot], t, stats);
                return Some(std::mem::replace(&mut node.entries[slot], pred));
            }
            if node.children[slot + 1].entries.len() >= t {
                let succ = Self::take_min(&mut node.children[slot + 1], t, stats);
                return Some(std::mem::replace(&mut node.entries[slot], succ));
            }
            Self::merge_children(node, slot, stats);
            return Self::remove_rec(&mut node.children[slot], t, key, stats);
        }

        // top up a minimal child before descending so the removal below
        // cannot underflow it
        if node.children[slot].entries.len() < t {
            Self::fill_child(node, t, slot, stats);
        }
        // a merge with the left sibling shifts the target child down a slot
        let slot = slot.min(node.entries.len());
        Self::remove_rec(&mut node.children[slot], t, key, stats)
    }

    /// Extract the largest entry in `node`'s subtree.
    ///
    /// Tops up the rightmost child before each descent, so every node on
    /// the path can lose an entry without underflowing.
    fn take_max(node: &mut Node<R>, t: usize, stats: &mut IndexStats) -> Entry<R> {
        if node.leaf {
            match node.entries.pop() {
                Some(entry) => return entry,
                None => unreachable!("a predecessor subtree is never empty"),
            }
        }
        let last = node.children.len() - 1;
        if node.children[last].entries.len() < t {
            Self::fill_child(node, t, last, stats);
        }
        // a merge may have absorbed the old rightmost child
        let last = node.children.len() - 1;
        Self::take_max(&mut node.children[last], t, stats)
    }

    /// Extract the smallest entry in `node`'s subtree.
    fn take_min(node: &mut Node<R>, t: usize, stats: &mut IndexStats) -> Entry<R> {
        if node.leaf {
            assert!(!node.entries.is_empty(), "a successor subtree is never empty");
            return node.entries.remove(0);
        }
        if node.children[0].entries.len() < t {
            Self::fill_child(node, t, 0, stats);
        }
        Self::take_min(&mut node.children[0], t, stats)
    }

    /// Bring the child at `slot` up to at least `t` entries.
    ///
    /// Borrows from a sibling that can spare an entry, preferring the left
    /// one, and falls back to merging with a sibling when both sit at the
    /// minimum.
    fn fill_child(parent: &mut Node<R>, t: usize, slot: usize, stats: &mut IndexStats) {
        if slot > 0 && parent.children[slot - 1].entries.len() >= t {
            Self::rotate_right(parent, slot, stats);
        } else if slot + 1 < parent.children.len() && parent.children[slot + 1].entries.len() >= t
        {
            Self::rotate_left(parent, slot, stats);
        } else if slot + 1 < parent.children.len() {
            Self::merge_children(parent, slot, stats);
        } else {
            Self::merge_children(parent, slot - 1, stats);
        }
    }

    /// Rotate one entry from the left sibling through the parent separator
    /// into `children[slot]`.
    fn rotate_right(parent: &mut Node<R>, slot: usize, stats: &mut IndexStats) {
        let (left_half, right_half) = parent.children.split_at_mut(slot);
        let left = &mut left_half[slot - 1];
        let child = &mut right_half[0];

        let donated = match left.entries.pop() {
            Some(entry) => entry,
            None => unreachable!("rotation source has at least t entries"),
        };
        let separator = std::mem::replace(&mut parent.entries[slot - 1], donated);
        child.entries.insert(0, separator);
        if !child.leaf {
            let moved = match left.children.pop() {
                Some(subtree) => subtree,
                None => unreachable!("internal sibling donates its last subtree"),
            };
            child.children.insert(0, moved);
        }
        stats.rotations += 1;
    }

    /// Rotate one entry from the right sibling through the parent separator
    /// into `children[slot]`.
    fn rotate_left(parent: &mut Node<R>, slot: usize, stats: &mut IndexStats) {
        let (left_half, right_half) = parent.children.split_at_mut(slot + 1);
        let child = &mut left_half[slot];
        let right = &mut right_half[0];

        let donated = right.entries.remove(0);
        let separator = std::mem::replace(&mut parent.entries[slot], donated);
        child.entries.push(separator);
        if !child.leaf {
            child.children.push(right.children.remove(0));
        }
        stats.rotations += 1;
    }

    /// Merge `children[slot]`, the separator above it, and `children[slot + 1]`
    /// into a single node at `slot`.
    ///
    /// Both children must hold `t - 1` entries, so the merged node holds
    /// exactly `2t - 1`.
    fn merge_children(parent: &mut Node<R>, slot: usize, stats: &mut IndexStats) {
        let mut right = parent.children.remove(slot + 1);
        let separator = parent.entries.remove(slot);
        let left = &mut parent.children[slot];

        left.entries.push(separator);
        left.entries.append(&mut right.entries);
        if !left.leaf {
            left.children.append(&mut right.children);
        }
        stats.merges += 1;
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Verify every structural invariant of the tree, panicking on the
    /// first violation.
    ///
    /// Checks entry-count bounds, child counts, global key ordering (which
    /// also rules out duplicates), separator bounds on every subtree, and
    /// uniform leaf depth.
    ///
    /// # Panics
    /// Panics with a description of the violated invariant. Intended for
    /// tests and debugging, not for request paths.
    pub fn check_invariants(&self) {
        assert!(
            self.root.entries.len() <= self.max_entries(),
            "root holds {} entries, max is {}",
            self.root.entries.len(),
            self.max_entries()
        );
        if !self.root.leaf {
            assert!(
                !self.root.entries.is_empty(),
                "internal root must hold at least one entry"
            );
        }

        let mut walk = InvariantWalk {
            prev_key: None,
            leaf_depth: None,
            entries_seen: 0,
        };
        self.check_node(&self.root, 0, None, None, &mut walk);

        assert_eq!(
            walk.entries_seen, self.len,
            "tree holds {} entries but len() reports {}",
            walk.entries_seen, self.len
        );
    }

    fn check_node(
        &self,
        node: &Node<R>,
        depth: usize,
        lo: Option<ContactId>,
        hi: Option<ContactId>,
        walk: &mut InvariantWalk,
    ) {
        let n = node.entries.len();
        if depth > 0 {
            assert!(
                n >= self.min_degree - 1 && n <= self.max_entries(),
                "node at depth {} holds {} entries, outside [{}, {}]",
                depth,
                n,
                self.min_degree - 1,
                self.max_entries()
            );
        }

        if node.leaf {
            assert!(
                node.children.is_empty(),
                "leaf at depth {} has {} children",
                depth,
                node.children.len()
            );
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(expected) => assert_eq!(
                    expected, depth,
                    "leaf at depth {} but {} expected",
                    depth, expected
                ),
            }
        } else {
            assert_eq!(
                node.children.len(),
                n + 1,
                "internal node at depth {} has {} entries but {} children",
                depth,
                n,
                node.children.len()
            );
        }

        for entry in &node.entries {
            if let Some(lo) = lo {
                assert!(entry.key > lo, "{} must exceed separator {}", entry.key, lo);
            }
            if let Some(hi) = hi {
                assert!(entry.key < hi, "{} must stay below separator {}", entry.key, hi);
            }
        }

        for slot in 0..n {
            if !node.leaf {
                let child_lo = if slot == 0 { lo } else { Some(node.entries[slot - 1].key) };
                let child_hi = Some(node.entries[slot].key);
                self.check_node(&node.children[slot], depth + 1, child_lo, child_hi, walk);
            }
            let key = node.entries[slot].key;
            if let Some(prev) = walk.prev_key {
                assert!(prev < key, "keys out of order: {} follows {}", key, prev);
            }
            walk.prev_key = Some(key);
            walk.entries_seen += 1;
        }
        if !node.leaf {
            let child_lo = if n == 0 { lo } else { Some(node.entries[n - 1].key) };
            self.check_node(&node.children[n], depth + 1, child_lo, hi, walk);
        }
    }

    #[inline]
    fn max_entries(&self) -> usize {
        2 * self.min_degree - 1
    }
}

/// Running state threaded through the invariant check.
struct InvariantWalk {
    prev_key: Option<ContactId>,
    leaf_depth: Option<usize>,
    entries_seen: usize,
}
