// tests/ownership_store.rs
use std::collections::BTreeSet;
use std::{io, path::PathBuf};

use diy_recipes::{
    recipe::RecipeId,
    store::{self, FileStore, KeyValueStore, MemoryStore, OwnershipStore, StoreError},
};

const KEY: &str = "diy_recipes.owned";

fn set(list: &[&str]) -> BTreeSet<RecipeId> {
    list.iter().map(|s| RecipeId::from(*s)).collect()
}

#[test]
fn entry_round_trip() {
    let backend = MemoryStore::with_entry(KEY, r#"["A","C"]"#);
    let store = OwnershipStore::load(backend, KEY);
    assert_eq!(store.owned(), &set(&["A", "C"]));
    assert!(store.is_owned(&"A".into()));
    assert!(!store.is_owned(&"B".into()));
}

#[test]
fn absent_or_corrupt_entry_means_nothing_owned() {
    assert!(store::load_owned(&MemoryStore::new(), KEY).is_empty());
    assert!(store::load_owned(&MemoryStore::with_entry(KEY, "{broken"), KEY).is_empty());
    assert!(store::load_owned(&MemoryStore::with_entry(KEY, r#"{"a":1}"#), KEY).is_empty());
}

#[test]
fn numeric_ids_load_as_text() {
    let got = store::load_owned(&MemoryStore::with_entry(KEY, r#"[1, "2"]"#), KEY);
    assert_eq!(got, set(&["1", "2"]));
}

#[test]
fn toggle_twice_restores_original_and_persists_each_time() {
    let mut store = OwnershipStore::load(MemoryStore::with_entry(KEY, r#"["A"]"#), KEY);

    assert!(store.toggle(&"B".into()).unwrap());
    assert_eq!(store::load_owned(store.backend(), KEY), set(&["A", "B"]));

    assert!(!store.toggle(&"B".into()).unwrap());
    assert_eq!(store.owned(), &set(&["A"]));
    assert_eq!(store.backend().raw(KEY), Some(r#"["A"]"#));
}

#[test]
fn set_owned_only_writes_on_change() {
    let mut store = OwnershipStore::load(MemoryStore::new(), KEY);
    store.set_owned(&"A".into(), false).unwrap();
    assert_eq!(store.backend().raw(KEY), None);

    store.set_owned(&"A".into(), true).unwrap();
    assert_eq!(store.backend().raw(KEY), Some(r#"["A"]"#));
}

#[test]
fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = OwnershipStore::load(FileStore::new(dir.path()), KEY);
    first.toggle(&"fish_rod".into()).unwrap();
    first.toggle(&"log_stool".into()).unwrap();
    drop(first);

    let second = OwnershipStore::load(FileStore::new(dir.path()), KEY);
    assert_eq!(second.owned(), &set(&["fish_rod", "log_stool"]));

    let fs = FileStore::new(dir.path());
    assert!(fs.path_for(KEY).is_file());
    assert_eq!(fs.get("never.written").unwrap(), None);
}

#[test]
fn file_store_keys_are_sanitized() {
    let fs = FileStore::new("store");
    let p = fs.path_for("a/b:c");
    assert_eq!(p.file_name().unwrap(), "a_b_c.json");
}

/// Holds one entry, refuses every write.
struct ReadOnlyStore(Option<String>);

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.0.clone())
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: PathBuf::from(key),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn failed_write_keeps_in_memory_flip() {
    let mut store = OwnershipStore::load(ReadOnlyStore(Some(r#"["A"]"#.to_string())), KEY);

    assert!(matches!(store.toggle(&"B".into()), Err(StoreError::Io { .. })));
    assert_eq!(store.owned(), &set(&["A", "B"]));

    assert!(store.toggle(&"A".into()).is_err());
    assert_eq!(store.owned(), &set(&["B"]));
}
