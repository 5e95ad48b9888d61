//! Common types and utilities shared across rolodb.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (ContactId)

pub mod config;
pub mod error;
mod contact_id;

pub use contact_id::ContactId;
pub use error::{Error, Result};
