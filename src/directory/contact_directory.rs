//! Contact directory facade over the B-tree index.

use std::path::Path;

use crate::common::config::DEFAULT_MIN_DEGREE;
use crate::common::{ContactId, Result};
use crate::directory::Contact;
use crate::index::{BTreeIndex, IndexStats};
use crate::storage::csv;

/// An in-memory contact book backed by a [`BTreeIndex`].
///
/// Lookups by id hit the index directly. Name queries walk the ordered
/// traversal, since the tree is keyed by id alone.
///
/// # Example
/// ```
/// use rolodb::{Contact, ContactDirectory, ContactId};
///
/// let mut directory = ContactDirectory::new();
/// let contact = Contact::new(ContactId::new(1), "Ada", "Lovelace", "ABC Inc.", "0123456789");
/// directory.add(contact).unwrap();
///
/// assert_eq!(directory.len(), 1);
/// assert!(directory.find(ContactId::new(1)).is_some());
/// ```
#[derive(Debug)]
pub struct ContactDirectory {
    index: BTreeIndex<Contact>,
}

impl ContactDirectory {
    /// Create an empty directory with the default minimum degree.
    pub fn new() -> Self {
        Self {
            index: BTreeIndex::new(DEFAULT_MIN_DEGREE)
                .unwrap_or_else(|_| unreachable!("the default minimum degree is valid")),
        }
    }

    /// Create an empty directory with an explicit minimum degree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDegree`](crate::Error::InvalidDegree) if
    /// `min_degree` is below 2.
    pub fn with_degree(min_degree: usize) -> Result<Self> {
        Ok(Self {
            index: BTreeIndex::new(min_degree)?,
        })
    }

    /// Number of contacts in the directory.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the directory holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Height of the underlying tree.
    pub fn height(&self) -> usize {
        self.index.height()
    }

    /// Structural-change counters of the underlying tree.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Add a contact, keyed by its id.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a
    /// contact with the same id already exists.
    pub fn add(&mut self, contact: Contact) -> Result<()> {
        let id = contact.id;
        self.index.insert(id, contact)?;
        tracing::debug!(id = id.0, "contact added");
        Ok(())
    }

    /// Look up a contact by id.
    pub fn find(&self, id: ContactId) -> Option<&Contact> {
        self.index.search(id)
    }

    /// All contacts whose last name matches, ignoring ASCII case.
    ///
    /// Results come back in id order.
    pub fn find_by_last_name(&self, last_name: &str) -> Vec<&Contact> {
        self.index
            .traverse()
            .into_iter()
            .map(|(_, contact)| contact)
            .filter(|contact| contact.last_name.eq_ignore_ascii_case(last_name))
            .collect()
    }

    /// All contacts with ids in the inclusive range `[lo, hi]`, in id order.
    pub fn in_id_range(&self, lo: ContactId, hi: ContactId) -> Vec<&Contact> {
        self.index
            .range(lo, hi)
            .into_iter()
            .map(|(_, contact)| contact)
            .collect()
    }

    /// All contacts in id order.
    pub fn all(&self) -> Vec<&Contact> {
        self.index
            .traverse()
            .into_iter()
            .map(|(_, contact)| contact)
            .collect()
    }

    /// Remove a contact by id, returning it.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let removed = self.index.delete(id);
        if removed.is_some() {
            tracing::debug!(id = id.0, "contact removed");
        }
        removed
    }

    /// Remove every contact whose last name matches, ignoring ASCII case.
    ///
    /// Matching ids are collected first, then each is deleted by key.
    /// Returns how many contacts were removed.
    pub fn remove_by_last_name(&mut self, last_name: &str) -> usize {
        let ids: Vec<ContactId> = self
            .find_by_last_name(last_name)
            .iter()
            .map(|contact| contact.id)
            .collect();
        for &id in &ids {
            self.index.delete(id);
        }
        if !ids.is_empty() {
            tracing::debug!(last_name, count = ids.len(), "contacts removed by last name");
        }
        ids.len()
    }

    /// Load contacts from a CSV file, adding them to the directory.
    ///
    /// Returns how many contacts were loaded.
    ///
    /// # Errors
    /// Propagates I/O and parse errors from the record source, and
    /// [`Error::DuplicateKey`](crate::Error::DuplicateKey) if the file
    /// holds an id that is already indexed.
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let contacts = csv::read_contacts(path.as_ref())?;
        let loaded = self
            .index
            .load(contacts.into_iter().map(|contact| (contact.id, contact)))?;
        tracing::info!(loaded, path = %path.as_ref().display(), "contacts loaded");
        Ok(loaded)
    }

    /// Write every contact to a CSV file in id order.
    ///
    /// # Errors
    /// Propagates I/O errors from the record source.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        csv::write_contacts(path.as_ref(), self.all())?;
        tracing::info!(count = self.len(), path = %path.as_ref().display(), "contacts saved");
        Ok(())
    }
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self::new()
    }
}
