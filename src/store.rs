// src/store.rs
//
// Local key-value persistence and the ownership set built on top of it.
//
// - KeyValueStore: get/set by key. FileStore keeps one file per key under a
//   directory (the desktop stand-in for browser local storage); MemoryStore
//   is the in-process fake used by tests.
// - OwnershipStore: set of owned recipe ids. Loaded once; every toggle
//   rewrites the whole entry immediately.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::recipe::RecipeId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot encode entry {key}: {source}")]
    Encode { key: String, source: serde_json::Error },
}

pub trait KeyValueStore {
    /// `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the whole value in one write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/* ---------- file-backed ---------- */

#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    /// Keys become file names; anything outside [A-Za-z0-9._-] is replaced.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
            .collect();
        self.dir.join(join!(&stem, ".json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let io_err = |source: io::Error| StoreError::Io { path: path.clone(), source };

        crate::file::ensure_directory(&self.dir).map_err(io_err)?;

        // Write aside, then swap in: readers see the old or the new value, never half.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/* ---------- in-memory ---------- */

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(s!(key), s!(value));
        Self { entries }
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(s!(key), s!(value));
        Ok(())
    }
}

/* ---------- ownership ---------- */

pub struct OwnershipStore<S: KeyValueStore> {
    backend: S,
    key: String,
    owned: BTreeSet<RecipeId>,
}

impl<S: KeyValueStore> OwnershipStore<S> {
    /// Read the persisted set. Missing or unreadable data means "nothing owned";
    /// this never fails.
    pub fn load(backend: S, key: &str) -> Self {
        let owned = load_owned(&backend, key);
        Self { backend, key: s!(key), owned }
    }

    pub fn is_owned(&self, id: &RecipeId) -> bool { self.owned.contains(id) }

    pub fn owned(&self) -> &BTreeSet<RecipeId> { &self.owned }

    pub fn len(&self) -> usize { self.owned.len() }
    pub fn is_empty(&self) -> bool { self.owned.is_empty() }

    pub fn backend(&self) -> &S { &self.backend }

    /// Flip membership, then persist the whole set.
    /// Returns the new membership. If the write fails the in-memory flip stays
    /// and the error goes back to the caller.
    pub fn toggle(&mut self, id: &RecipeId) -> Result<bool, StoreError> {
        let now_owned = if self.owned.remove(id) {
            false
        } else {
            self.owned.insert(id.clone());
            true
        };
        self.save()?;
        Ok(now_owned)
    }

    /// Explicit membership; persists only on change.
    pub fn set_owned(&mut self, id: &RecipeId, owned: bool) -> Result<(), StoreError> {
        if self.is_owned(id) != owned {
            self.toggle(id)?;
        }
        Ok(())
    }

    /// Serialize-and-overwrite.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let ids: Vec<&RecipeId> = self.owned.iter().collect();
        let text = serde_json::to_string(&ids)
            .map_err(|source| StoreError::Encode { key: self.key.clone(), source })?;
        self.backend.set(&self.key, &text)?;
        logd!("Store: Saved {} owned id(s) under {}", ids.len(), self.key);
        Ok(())
    }
}

/// Parse the persisted entry. Any problem yields the empty set.
pub fn load_owned<S: KeyValueStore>(backend: &S, key: &str) -> BTreeSet<RecipeId> {
    let text = match backend.get(key) {
        Ok(Some(t)) => t,
        Ok(None) => {
            logd!("Store: No entry for {key}, starting empty");
            return BTreeSet::new();
        }
        Err(e) => {
            logd!("Store: Read failed for {key} ({e}), starting empty");
            return BTreeSet::new();
        }
    };

    match serde_json::from_str::<Vec<RecipeId>>(&text) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            logd!("Store: Corrupt entry for {key} ({e}), starting empty");
            BTreeSet::new()
        }
    }
}
