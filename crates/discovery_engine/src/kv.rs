use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use discovery_logging::{discovery_debug, discovery_trace, discovery_warn};

use crate::persist::{AtomicFile, PersistError};

/// Keys of the durable client-local store.
pub mod keys {
    pub const TAGS: &str = "tags";
    pub const MIN_STARS: &str = "min_stars";
    pub const MAX_STARS: &str = "max_stars";
    pub const SERVER_URL: &str = "server_url";
    pub const STARRED_PROJECTS: &str = "starred_projects";
}

/// Durable string key-value storage shared by the preference and starred stores.
pub trait KeyValueStore: Send + Sync {
    /// Missing keys and unreadable storage both read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Reads several keys from one snapshot, in the order given.
    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Writes every entry in one commit; readers never see part of a batch.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), PersistError>;

    fn set(&self, key: &str, value: String) -> Result<(), PersistError> {
        self.set_many(&[(key, value)])
    }
}

/// Volatile store for tests and hosts that do not need durability.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
    commits: AtomicUsize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            entries: Mutex::new(map),
            commits: AtomicUsize::new(0),
        }
    }

    /// Number of `set_many` commits so far.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        keys.iter().map(|key| entries.get(*key).cloned()).collect()
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), PersistError> {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// All keys in one JSON object file, rewritten atomically on every commit.
#[derive(Debug)]
pub struct FileKeyValueStore {
    file: AtomicFile,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicFile::new(path),
            write_lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        discovery_trace!("Reading state from {:?}", self.file.path());
        let content = match self.file.read() {
            Ok(Some(text)) => text,
            Ok(None) => return BTreeMap::new(),
            Err(err) => {
                discovery_warn!("Failed to read state from {:?}: {}", self.file.path(), err);
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(err) => {
                discovery_warn!("Failed to parse state from {:?}: {}", self.file.path(), err);
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        let mut map = self.read_map();
        keys.iter().map(|key| map.remove(*key)).collect()
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), PersistError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        let content = serde_json::to_string_pretty(&map)?;
        self.file.replace(&content)?;
        discovery_debug!("Committed {} key(s) to {:?}", entries.len(), self.file.path());
        Ok(())
    }
}
