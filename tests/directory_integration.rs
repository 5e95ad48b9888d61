//! Directory Integration Tests
//!
//! Full pipeline: generate a dataset, write it to CSV, load it into a
//! fresh directory, query and mutate it, save it again.

use rolodb::storage::csv;
use rolodb::{datagen, Contact, ContactDirectory, ContactId, Error};
use tempfile::tempdir;

fn generated_dataset(count: usize, seed: u64) -> Vec<Contact> {
    let mut rng = datagen::seeded_rng(Some(seed));
    datagen::generate_contacts(count, 0, &mut rng)
}

#[test]
fn test_generate_save_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.csv");

    let contacts = generated_dataset(40, 42);
    csv::write_contacts(&path, &contacts).unwrap();

    let mut directory = ContactDirectory::new();
    let loaded = directory.load_csv(&path).unwrap();

    assert_eq!(loaded, 40);
    assert_eq!(directory.len(), 40);
    for contact in &contacts {
        assert_eq!(directory.find(contact.id), Some(contact));
    }

    let ids: Vec<u64> = directory.all().iter().map(|c| c.id.0).collect();
    assert_eq!(ids, (0..40).collect::<Vec<u64>>());
}

#[test]
fn test_directory_save_reload_preserves_everything() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.csv");

    let mut original = ContactDirectory::new();
    for contact in generated_dataset(25, 7) {
        original.add(contact).unwrap();
    }
    // quoting must survive the trip too
    original
        .add(Contact::new(
            ContactId::new(500),
            "Ada",
            "Lovelace",
            "Hopper, Mauchly and Eckert",
            "0123456789",
        ))
        .unwrap();
    original.save_csv(&path).unwrap();

    let mut reloaded = ContactDirectory::new();
    reloaded.load_csv(&path).unwrap();

    assert_eq!(reloaded.len(), original.len());
    assert_eq!(reloaded.all(), original.all());
    assert_eq!(
        reloaded.find(ContactId::new(500)).unwrap().company,
        "Hopper, Mauchly and Eckert"
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does_not_exist.csv");

    let mut directory = ContactDirectory::new();
    let err = directory.load_csv(&path).unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert!(directory.is_empty());
}

#[test]
fn test_load_duplicate_ids_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.csv");

    let mut contacts = generated_dataset(5, 3);
    contacts.push(contacts[2].clone());
    csv::write_contacts(&path, &contacts).unwrap();

    let mut directory = ContactDirectory::new();
    let err = directory.load_csv(&path).unwrap_err();

    assert!(matches!(err, Error::DuplicateKey(id) if id.0 == 2));
}

#[test]
fn test_remove_by_last_name_survives_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.csv");

    let mut directory = ContactDirectory::new();
    for contact in generated_dataset(30, 11) {
        directory.add(contact).unwrap();
    }
    let victim = directory.all()[4].clone();

    let removed = directory.remove_by_last_name(&victim.last_name);
    assert!(removed >= 1);
    directory.save_csv(&path).unwrap();

    let mut reloaded = ContactDirectory::new();
    reloaded.load_csv(&path).unwrap();

    assert_eq!(reloaded.len(), directory.len());
    assert!(reloaded.find_by_last_name(&victim.last_name).is_empty());
    assert!(reloaded.find(victim.id).is_none());
}

#[test]
fn test_large_dataset_builds_a_real_tree() {
    let mut directory = ContactDirectory::new();
    for contact in generated_dataset(200, 99) {
        directory.add(contact).unwrap();
    }

    assert_eq!(directory.len(), 200);
    assert!(directory.height() >= 2);
    assert!(directory.stats().splits > 0);

    let window = directory.in_id_range(ContactId::new(50), ContactId::new(59));
    let ids: Vec<u64> = window.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, (50..60).collect::<Vec<u64>>());
}

#[test]
fn test_empty_directory_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.csv");

    let directory = ContactDirectory::new();
    directory.save_csv(&path).unwrap();

    let mut reloaded = ContactDirectory::new();
    assert_eq!(reloaded.load_csv(&path).unwrap(), 0);
    assert!(reloaded.is_empty());
}
