#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use probe_table::{DEFAULT_INITIAL_CAPACITY, InsertError, ProbeTable, SlotTag, home_index};
use test_log::test;

/// Table with the keys `"1"..="n"` mapped to their numeric value
fn numbered_table(n: usize) -> ProbeTable {
    let mut table = ProbeTable::new();
    for i in 1..=n {
        assert!(table.insert(i.to_string(), i));
    }
    table
}

#[test]
fn test_default_capacity() {
    let table: ProbeTable = ProbeTable::default();
    assert_eq!(table.capacity(), DEFAULT_INITIAL_CAPACITY);
    assert_eq!(table.capacity(), 8);
    assert!(table.is_empty());
}

#[test]
fn test_fourth_insert_doubles_default_table() {
    let table = numbered_table(3);
    assert_eq!(table.capacity(), 8);

    let table = numbered_table(4);
    assert_eq!(table.len(), 4);
    assert_eq!(table.capacity(), 16);
    assert!((table.load_factor() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn test_duplicate_insert_keeps_first_value() {
    let mut table = ProbeTable::new();
    assert!(table.insert("a", 1));
    assert!(!table.insert("a", 2));
    assert_eq!(table.get("a"), Some(&1));
    assert!(matches!(table.try_insert("a", 3), Err(InsertError::DuplicateKey { .. })));
}

#[test]
fn test_insert_reuses_tombstone() {
    let mut table = ProbeTable::with_capacity(8);
    for i in 1..=8 {
        assert!(table.insert(format!("key-{i}"), i));
    }
    let capacity = table.capacity();

    let tombstone = table.find_slot_index("key-3").unwrap();
    assert!(table.remove("key-3"));
    assert_eq!(table.slots()[tombstone].tag(), SlotTag::Tombstoned);

    // A ninth key whose home is the tombstoned slot must land right there.
    let ninth = (0..)
        .map(|n| format!("extra-{n}"))
        .find(|key| home_index(key, capacity) == tombstone)
        .unwrap();
    assert!(table.insert(ninth.clone(), 9));

    assert_eq!(table.capacity(), capacity);
    assert_eq!(table.find_slot_index(&ninth), Some(tombstone));
    assert_eq!(table.slots()[tombstone].tag(), SlotTag::Occupied);
    assert_eq!(table.len(), 8);
}

#[test]
fn test_subscript_on_missing_key_inserts_default() {
    let mut table: ProbeTable = ProbeTable::new();
    assert_eq!(*table.get_or_insert_default("missing"), 0);
    assert!(table.contains("missing"));
    assert_eq!(table.get("missing"), Some(&0));
}

#[test]
fn test_subscript_sets_value() {
    let mut table = numbered_table(8);
    assert_eq!(*table.get_or_insert_default("7"), 7);

    *table.get_or_insert_default("7") = 42;
    assert_eq!(table.get("7"), Some(&42));
    assert_eq!(table.len(), 8);
}

#[test]
fn test_empty_table() {
    let table: ProbeTable = ProbeTable::new();
    assert_eq!(table.to_string(), "Table is empty\n");
    assert!(table.load_factor().abs() < f64::EPSILON);
    assert!(table.keys().is_empty());
    assert_eq!(table.iter().count(), 0);
}

#[test]
fn test_sixteen_inserts_survive_resizes() {
    let table = numbered_table(16);
    assert_eq!(table.len(), 16);
    assert_eq!(table.capacity(), 64);
    for i in 1..=16 {
        assert_eq!(table.get(&i.to_string()), Some(&i));
    }
    assert!(table.load_factor() < 0.5);
}

#[test]
fn test_remove_all() {
    let mut table = numbered_table(8);
    for i in 1..=8 {
        assert!(table.remove(&i.to_string()));
    }
    assert!(table.is_empty());
    assert!(!table.remove("13"));
    assert!(!table.contains("1"));
    assert_eq!(table.get("4"), None);
    assert_eq!(table.to_string(), "Table is empty\n");
}

#[test]
fn test_missing_keys() {
    let table = numbered_table(8);
    assert!(!table.contains("13"));
    assert_eq!(table.get("13"), None);
    assert_eq!(table.find_slot_index("13"), None);
}

#[test]
fn test_keys_are_unique() {
    let mut table = numbered_table(8);
    for i in 1..=8 {
        assert!(!table.insert(i.to_string(), 0));
    }

    let mut keys = table.keys();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 8);
}

#[test]
fn test_display_lists_occupied_slots() {
    let table = numbered_table(3);
    let rendered = table.to_string();
    assert_eq!(rendered.lines().count(), 3);

    for (key, value) in &table {
        let index = table.find_slot_index(key).unwrap();
        assert!(rendered.contains(&format!("Bucket {index}: <{key}, {value}>")));
    }
}

#[test]
fn test_larger_keys_after_small_ones() {
    let mut table = numbered_table(4);
    for k in (111..=444).step_by(111) {
        assert!(table.insert(k.to_string(), k));
    }
    assert_eq!(table.len(), 8);
    assert_eq!(table.capacity(), 32);
    assert_eq!(table.get("333"), Some(&333));
}
