//! Ordered index structures.
//!
//! The index maps [`ContactId`](crate::common::ContactId) keys to record
//! payloads and keeps them in key order, so point lookups, range scans,
//! and full ordered traversals all run off the same structure.
//!
//! # Components
//! - [`BTreeIndex`] - The B-tree itself
//! - [`IndexStats`] - Counters for splits, merges, and rotations
//! - `node` - Node and entry layout (crate-private)

mod btree;
mod node;
mod stats;

pub use btree::BTreeIndex;
pub use stats::IndexStats;
