//! Record persistence.
//!
//! The directory lives in memory; this module is how datasets get in and
//! out of it.
//!
//! # Components
//! - [`csv`] - CSV reader/writer for contact datasets

pub mod csv;
