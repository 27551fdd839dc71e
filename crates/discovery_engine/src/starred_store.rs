use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use discovery_core::Project;
use discovery_logging::{discovery_info, discovery_warn};

use crate::kv::{keys, KeyValueStore};
use crate::persist::PersistError;

/// Persisted, url-keyed set of starred projects in insertion order.
pub struct StarredStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl StarredStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    pub fn list(&self) -> Vec<Project> {
        self.read_all()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.read_all().iter().any(|project| project.url == url)
    }

    /// Appends `project` unless its url is already starred.
    /// Returns whether it was added; nothing is written otherwise.
    pub fn add(&self, project: &Project) -> Result<bool, PersistError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut projects = self.read_all();
        if projects.iter().any(|existing| existing.url == project.url) {
            return Ok(false);
        }
        projects.push(project.clone());
        self.write_all(&projects)?;
        discovery_info!("Starred {}", project.url);
        Ok(true)
    }

    /// Removes the entry for `url` if present. The set is written back either
    /// way so storage stays canonical. Returns whether an entry was removed.
    pub fn remove(&self, url: &str) -> Result<bool, PersistError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut projects = self.read_all();
        let before = projects.len();
        projects.retain(|project| project.url != url);
        self.write_all(&projects)?;
        Ok(projects.len() != before)
    }

    fn read_all(&self) -> Vec<Project> {
        let Some(raw) = self.kv.get(keys::STARRED_PROJECTS) else {
            return Vec::new();
        };
        let projects: Vec<Project> = match serde_json::from_str(&raw) {
            Ok(projects) => projects,
            Err(err) => {
                discovery_warn!("Discarding unreadable starred projects: {}", err);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        projects
            .into_iter()
            .filter(|project| seen.insert(project.url.clone()))
            .collect()
    }

    fn write_all(&self, projects: &[Project]) -> Result<(), PersistError> {
        let encoded = serde_json::to_string(projects)?;
        self.kv.set(keys::STARRED_PROJECTS, encoded)
    }
}
