//! Random contact generation for seeding datasets.
//!
//! Names come from small built-in tables and companies follow the usual
//! fake-data patterns, so generated files read like a plausible contact
//! book. Company names may contain commas, which exercises the quoting
//! path in [`storage::csv`](crate::storage::csv). Ids are sequential.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::ContactId;
use crate::directory::Contact;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc.", "LLC", "Group", "Ltd."];

/// Build a generator RNG, seeded for reproducibility when `seed` is given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    StdRng::seed_from_u64(seed)
}

/// Generate `count` contacts with sequential ids starting at `start_id`.
pub fn generate_contacts<R: Rng>(count: usize, start_id: u64, rng: &mut R) -> Vec<Contact> {
    (0..count)
        .map(|offset| random_contact(ContactId::new(start_id + offset as u64), rng))
        .collect()
}

/// Generate a single contact under the given id.
pub fn random_contact<R: Rng>(id: ContactId, rng: &mut R) -> Contact {
    Contact::new(
        id,
        pick(rng, FIRST_NAMES),
        pick(rng, LAST_NAMES),
        random_company(rng),
        random_phone(rng),
    )
}

fn pick<'a, R: Rng>(rng: &mut R, table: &'a [&'a str]) -> &'a str {
    table[rng.random_range(0..table.len())]
}

/// One of the three classic fake-company patterns.
fn random_company<R: Rng>(rng: &mut R) -> String {
    match rng.random_range(0..3u8) {
        0 => format!(
            "{} {}",
            pick(rng, LAST_NAMES),
            pick(rng, COMPANY_SUFFIXES)
        ),
        1 => format!("{}-{}", pick(rng, LAST_NAMES), pick(rng, LAST_NAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES)
        ),
    }
}

/// Ten decimal digits, leading zeros allowed.
fn random_phone<R: Rng>(rng: &mut R) -> String {
    (0..10)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
