//! CSV record source for contact datasets.
//!
//! Reading and writing both go through this module, so a directory saved
//! with [`write_contacts`] always loads back with [`read_contacts`].
//!
//! # File Layout
//! One header row, then one row per contact:
//! ```text
//! contact_id,firstname,lastname,company,phonenumber
//! 0,Ada,Lovelace,ABC Inc.,0123456789
//! 1,Grace,Hopper,"Hopper, Mauchly and Eckert",0987654321
//! ```
//!
//! Fields containing a comma, quote, or line break are quoted; a literal
//! quote inside a quoted field is doubled. That is the minimal RFC 4180
//! subset the generator and the directory need.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::common::{ContactId, Error, Result};
use crate::directory::Contact;

/// Expected header row.
pub const CSV_HEADER: &str = "contact_id,firstname,lastname,company,phonenumber";

/// Fields per record.
const FIELD_COUNT: usize = 5;

/// Read every contact from a CSV file.
///
/// Blank lines are skipped. Rows come back in file order; the caller
/// decides how to index them.
///
/// # Errors
/// - [`Error::Io`] if the file cannot be opened or read
/// - [`Error::InvalidHeader`] if the header row is missing or wrong
/// - [`Error::MalformedRecord`] for rows with the wrong field count, an
///   unparseable id, or broken quoting
pub fn read_contacts<P: AsRef<Path>>(path: P) -> Result<Vec<Contact>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::InvalidHeader(CSV_HEADER.to_string())),
    };
    if header.trim() != CSV_HEADER {
        return Err(Error::InvalidHeader(CSV_HEADER.to_string()));
    }

    let mut contacts = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line = line?;
        let line_no = offset + 2; // the header was line 1
        if line.trim().is_empty() {
            continue;
        }
        contacts.push(parse_record(&line, line_no)?);
    }
    Ok(contacts)
}

/// Write contacts to a CSV file, header first.
///
/// Truncates any existing file at `path`.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_contacts<'a, P, I>(path: P, contacts: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Contact>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{CSV_HEADER}")?;
    for contact in contacts {
        writeln!(
            writer,
            "{},{},{},{},{}",
            contact.id.0,
            escape(&contact.first_name),
            escape(&contact.last_name),
            escape(&contact.company),
            escape(&contact.phone)
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_record(line: &str, line_no: usize) -> Result<Contact> {
    let fields = split_record(line, line_no)?;
    let [id_text, first_name, last_name, company, phone]: [String; FIELD_COUNT] =
        fields.try_into().map_err(|fields: Vec<String>| {
            Error::MalformedRecord {
                line: line_no,
                reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            }
        })?;

    let id: u64 = id_text.trim().parse().map_err(|_| Error::MalformedRecord {
        line: line_no,
        reason: format!("contact_id `{id_text}` is not an unsigned integer"),
    })?;

    Ok(Contact::new(
        ContactId::new(id),
        first_name,
        last_name,
        company,
        phone,
    ))
}

/// Split one CSV line into fields, honoring quoted fields.
fn split_record(line: &str, line_no: usize) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        let mut field = String::new();
        if chars.peek() == Some(&'"') {
            chars.next(); // opening quote
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => {
                        return Err(Error::MalformedRecord {
                            line: line_no,
                            reason: "unterminated quoted field".to_string(),
                        });
                    }
                }
            }
            fields.push(field);
            match chars.next() {
                Some(',') => continue,
                None => break,
                Some(c) => {
                    return Err(Error::MalformedRecord {
                        line: line_no,
                        reason: format!("unexpected `{c}` after closing quote"),
                    });
                }
            }
        } else {
            let mut saw_comma = false;
            for c in chars.by_ref() {
                if c == ',' {
                    saw_comma = true;
                    break;
                }
                field.push(c);
            }
            fields.push(field);
            if !saw_comma {
                break;
            }
        }
    }
    Ok(fields)
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn escape(field: &str) -> String {
    let needs_quoting = field
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
