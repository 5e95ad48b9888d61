//! Contact record type.

use std::fmt;

use crate::common::ContactId;

/// One entry in the contact directory.
///
/// The `id` doubles as the index key; every other field is payload. Two
/// contacts may share any name or number, but never an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub phone: String,
}

impl Contact {
    /// Create a contact from its fields.
    pub fn new(
        id: ContactId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        company: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: company.into(),
            phone: phone.into(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contact({}, {}, {}, {}, {})",
            self.id.0, self.first_name, self.last_name, self.company, self.phone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_display() {
        let contact = Contact::new(
            ContactId::new(7),
            "Ada",
            "Lovelace",
            "ABC Inc.",
            "0123456789",
        );
        assert_eq!(
            format!("{}", contact),
            "Contact(7, Ada, Lovelace, ABC Inc., 0123456789)"
        );
    }

    #[test]
    fn test_contact_equality_covers_all_fields() {
        let a = Contact::new(ContactId::new(1), "Ada", "Lovelace", "ABC Inc.", "0");
        let mut b = a.clone();
        assert_eq!(a, b);

        b.phone = "1".to_string();
        assert_ne!(a, b);
    }
}
