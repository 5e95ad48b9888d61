//! Contact directory built on the ordered index.
//!
//! # Components
//! - [`Contact`] - The record stored under each id
//! - [`ContactDirectory`] - Directory operations (add, find, remove, CSV)

mod contact;
mod contact_directory;

pub use contact::Contact;
pub use contact_directory::ContactDirectory;
