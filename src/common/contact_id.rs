//! Contact identifier type.
//!
//! Every record in the directory is keyed by a [`ContactId`]. The index
//! orders entries by this key alone, so two contacts may share a name but
//! never an id.

use std::fmt;

/// Identifies a contact in the directory.
///
/// A `u64` leaves room for any realistic dataset while staying `Copy`, so
/// keys can be compared and moved between nodes without touching the
/// record payloads.
///
/// # Example
/// ```
/// use rolodb::ContactId;
///
/// let id = ContactId::new(42);
/// assert_eq!(id.0, 42);
/// assert!(id < ContactId::new(43));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u64);

impl ContactId {
    /// Create a new ContactId.
    #[inline]
    pub fn new(id: u64) -> Self {
        ContactId(id)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact({})", self.0)
    }
}

impl From<u64> for ContactId {
    fn from(id: u64) -> Self {
        ContactId(id)
    }
}
