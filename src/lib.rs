//! rolodb - An in-memory contact directory indexed by a B-tree.
//!
//! # Architecture
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                          rolodb                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │                CLI (src/main.rs)                     │  │
//! │  │        repl subcommand │ generate subcommand         │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │               ↓                          ↓                 │
//! │  ┌──────────────────────────┐  ┌──────────────────────┐   │
//! │  │  Directory (directory/)  │  │  Datagen (datagen)   │   │
//! │  │  ContactDirectory + CSV  │  │  random contacts     │   │
//! │  │  load/save + name query  │  └──────────────────────┘   │
//! │  └──────────────────────────┘                             │
//! │               ↓                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │                 Index Layer (index/)                 │  │
//! │  │     BTreeIndex: search | range | traverse |          │  │
//! │  │                 insert/split | delete/merge          │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │               ↓                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │               Storage Layer (storage/)               │  │
//! │  │              CSV record source (csv)                 │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (ContactId, Error, config)
//! - [`index`] - The B-tree ordered index
//! - [`directory`] - Contact records and the directory facade
//! - [`storage`] - CSV reader/writer
//! - [`datagen`] - Random dataset generation
//!
//! # Quick Start
//! ```
//! use rolodb::{Contact, ContactDirectory, ContactId};
//!
//! let mut directory = ContactDirectory::new();
//! directory
//!     .add(Contact::new(
//!         ContactId::new(1),
//!         "Ada",
//!         "Lovelace",
//!         "ABC Inc.",
//!         "0123456789",
//!     ))
//!     .unwrap();
//!
//! let found = directory.find(ContactId::new(1)).unwrap();
//! assert_eq!(found.last_name, "Lovelace");
//! ```

// Core modules
pub mod common;
pub mod datagen;
pub mod directory;
pub mod index;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_CONTACTS_FILE, DEFAULT_MIN_DEGREE};
pub use common::{ContactId, Error, Result};

pub use directory::{Contact, ContactDirectory};
pub use index::{BTreeIndex, IndexStats};
