//! Error types for rolodb.

use thiserror::Error;

use crate::common::ContactId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in rolodb.
///
/// A single error type keeps error handling consistent across the index,
/// the directory facade, and the CSV record source. Lookups that merely
/// miss are not errors; those return `Option` instead.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the record source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested minimum degree is below the B-tree floor of 2.
    #[error("invalid minimum degree {0}: a B-tree needs t >= 2")]
    InvalidDegree(usize),

    /// Insert targeted a key that is already present.
    ///
    /// The tree is left exactly as it was before the insert.
    #[error("duplicate key: {0} is already in the index")]
    DuplicateKey(ContactId),

    /// A CSV row could not be converted into a contact.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The CSV header row is missing or does not match the contact schema.
    #[error("missing or invalid header: expected `{0}`")]
    InvalidHeader(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateKey(ContactId::new(42));
        assert_eq!(
            format!("{}", err),
            "duplicate key: Contact(42) is already in the index"
        );

        let err = Error::InvalidDegree(1);
        assert_eq!(
            format!("{}", err),
            "invalid minimum degree 1: a B-tree needs t >= 2"
        );

        let err = Error::MalformedRecord {
            line: 3,
            reason: "expected 5 fields, found 4".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "malformed record on line 3: expected 5 fields, found 4"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        // This function returns our Result type
        fn might_fail() -> Result<u64> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
