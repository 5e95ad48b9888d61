//! B-tree Property Tests
//!
//! Drives the index with randomized workloads against `BTreeMap` as the
//! reference model, re-checking the structural invariants after every
//! mutation.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use rolodb::{BTreeIndex, ContactId};

#[derive(Debug, Clone)]
enum Op {
    Insert(u64),
    Delete(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..150).prop_map(Op::Insert),
        (0u64..150).prop_map(Op::Delete),
    ]
}

fn keys_of(index: &BTreeIndex<u64>) -> Vec<u64> {
    index.traverse().into_iter().map(|(id, _)| id.0).collect()
}

fn index_from(t: usize, keys: &BTreeSet<u64>) -> BTreeIndex<u64> {
    let mut index = BTreeIndex::new(t).unwrap();
    for &key in keys {
        index.insert(ContactId::new(key), key).unwrap();
    }
    index
}

proptest! {
    #[test]
    fn matches_model_under_random_workloads(
        ops in prop::collection::vec(op_strategy(), 1..300),
        t in 2usize..6,
    ) {
        let mut index = BTreeIndex::new(t).unwrap();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    if model.contains_key(&key) {
                        prop_assert!(index.insert(ContactId::new(key), key).is_err());
                    } else {
                        prop_assert!(index.insert(ContactId::new(key), key).is_ok());
                        model.insert(key, key);
                    }
                }
                Op::Delete(key) => {
                    prop_assert_eq!(index.delete(ContactId::new(key)), model.remove(&key));
                }
            }
            index.check_invariants();
            prop_assert_eq!(index.len(), model.len());
        }

        let expected: Vec<u64> = model.keys().copied().collect();
        prop_assert_eq!(keys_of(&index), expected);
    }

    #[test]
    fn traversal_is_strictly_sorted(
        keys in prop::collection::vec(0u64..1000, 0..120),
        t in 2usize..6,
    ) {
        let mut index = BTreeIndex::new(t).unwrap();
        for &key in &keys {
            // duplicates in the input are rejected, everyone else goes in
            let _ = index.insert(ContactId::new(key), key);
        }
        index.check_invariants();

        let out = keys_of(&index);
        prop_assert!(out.windows(2).all(|pair| pair[0] < pair[1]));

        let expected: Vec<u64> = keys.iter().copied().collect::<BTreeSet<u64>>().into_iter().collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn range_matches_model(
        keys in prop::collection::btree_set(0u64..500, 0..80),
        lo in 0u64..500,
        hi in 0u64..500,
        t in 2usize..6,
    ) {
        let index = index_from(t, &keys);

        let got: Vec<u64> = index
            .range(ContactId::new(lo), ContactId::new(hi))
            .into_iter()
            .map(|(id, _)| id.0)
            .collect();
        let expected: Vec<u64> = if lo <= hi {
            keys.range(lo..=hi).copied().collect()
        } else {
            Vec::new()
        };

        prop_assert_eq!(got, expected);
    }

    #[test]
    fn search_finds_exactly_the_inserted_keys(
        keys in prop::collection::btree_set(0u64..400, 0..80),
        probes in prop::collection::vec(0u64..400, 1..40),
        t in 2usize..6,
    ) {
        let index = index_from(t, &keys);

        for probe in probes {
            let expected = keys.contains(&probe).then_some(probe);
            prop_assert_eq!(index.search(ContactId::new(probe)).copied(), expected);
        }
    }

    #[test]
    fn insert_then_delete_restores_key_set(
        keys in prop::collection::btree_set(0u64..300, 0..60),
        probe in 0u64..300,
        t in 2usize..6,
    ) {
        prop_assume!(!keys.contains(&probe));
        let mut index = index_from(t, &keys);
        let before = keys_of(&index);

        index.insert(ContactId::new(probe), probe).unwrap();
        index.check_invariants();
        prop_assert_eq!(index.delete(ContactId::new(probe)), Some(probe));
        index.check_invariants();

        prop_assert_eq!(keys_of(&index), before);
    }

    #[test]
    fn absent_delete_keeps_key_set(
        keys in prop::collection::btree_set(0u64..300, 1..60),
        probe in 0u64..300,
        t in 2usize..6,
    ) {
        prop_assume!(!keys.contains(&probe));
        let mut index = index_from(t, &keys);
        let before = keys_of(&index);

        prop_assert_eq!(index.delete(ContactId::new(probe)), None);
        index.check_invariants();

        prop_assert_eq!(index.len(), before.len());
        prop_assert_eq!(keys_of(&index), before);
    }

    #[test]
    fn height_shrinks_back_to_zero(
        keys in prop::collection::btree_set(0u64..200, 1..80),
        t in 2usize..6,
    ) {
        let mut index = index_from(t, &keys);

        for &key in &keys {
            prop_assert_eq!(index.delete(ContactId::new(key)), Some(key));
            index.check_invariants();
        }

        prop_assert!(index.is_empty());
        prop_assert_eq!(index.height(), 0);
    }
}
