//! Opener store - user and stock openers keyed by (job, name)
//!
//! User openers live in an openers.json next to the config; stock openers
//! ship with the install and are read-only. Load failures degrade to an
//! empty store so a corrupt file never takes the plugin down.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::actions::Job;
use crate::openers::Opener;

type OpenerMap = BTreeMap<Job, BTreeMap<String, Vec<i32>>>;

/// Failure saving the user openers file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write openers file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize openers: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-editable openers plus the read-only stock set
#[derive(Debug, Default)]
pub struct OpenerStore {
    openers: OpenerMap,
    defaults: OpenerMap,
    openers_file: Option<PathBuf>,
}

impl OpenerStore {
    /// Empty in-memory store (tests, headless tools)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load user openers from `openers_file` and stock openers from
    /// `defaults_file`. Missing or malformed files yield empty sets.
    pub fn load(openers_file: &Path, defaults_file: &Path) -> Self {
        Self {
            openers: load_openers(openers_file),
            defaults: load_openers(defaults_file),
            openers_file: Some(openers_file.to_path_buf()),
        }
    }

    /// Add or replace a user opener
    pub fn add(&mut self, name: &str, job: Job, slots: impl Into<Vec<i32>>) {
        self.openers
            .entry(job)
            .or_default()
            .insert(name.to_string(), slots.into());
    }

    /// Look up a user opener
    pub fn get(&self, name: &str, job: Job) -> Option<Opener> {
        self.openers
            .get(&job)
            .and_then(|m| m.get(name))
            .map(|slots| Opener::new(name, job, slots.clone()))
    }

    /// Look up a stock opener
    pub fn get_default(&self, name: &str, job: Job) -> Option<Opener> {
        self.defaults
            .get(&job)
            .and_then(|m| m.get(name))
            .map(|slots| Opener::new(name, job, slots.clone()))
    }

    /// Delete a user opener; empty job buckets are dropped
    pub fn delete(&mut self, name: &str, job: Job) {
        if let Some(by_name) = self.openers.get_mut(&job) {
            by_name.remove(name);
            if by_name.is_empty() {
                self.openers.remove(&job);
            }
        }
    }

    /// User opener names grouped by job, in stable job order
    pub fn names(&self) -> Vec<(Job, Vec<String>)> {
        names_of(&self.openers)
    }

    /// Stock opener names grouped by job
    pub fn default_names(&self) -> Vec<(Job, Vec<String>)> {
        names_of(&self.defaults)
    }

    /// Persist the user openers to the file the store was loaded from.
    /// A store created with `new` has nowhere to save and is a no-op.
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.openers_file else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.openers)?;
        fs::write(path, json)?;
        info!("Saved openers to {}", path.display());
        Ok(())
    }
}

fn names_of(map: &OpenerMap) -> Vec<(Job, Vec<String>)> {
    map.iter()
        .map(|(&job, by_name)| (job, by_name.keys().cloned().collect()))
        .collect()
}

fn load_openers(path: &Path) -> OpenerMap {
    if !path.exists() {
        return OpenerMap::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read openers from {}: {}", path.display(), e);
            return OpenerMap::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(map) => map,
        Err(e) => {
            warn!("Failed to parse openers from {}: {}", path.display(), e);
            OpenerMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get_delete() {
        let mut store = OpenerStore::new();
        store.add("Standard", Job::NIN, vec![2259, 0, -1]);

        let opener = store.get("Standard", Job::NIN).unwrap();
        assert_eq!(opener.slots, vec![2259, 0, -1]);
        assert!(store.get("Standard", Job::BLM).is_none());

        store.delete("Standard", Job::NIN);
        assert!(store.get("Standard", Job::NIN).is_none());
        assert!(store.names().is_empty(), "empty job buckets are dropped");
    }

    #[test]
    fn test_names_grouped_by_job() {
        let mut store = OpenerStore::new();
        store.add("A", Job::NIN, vec![1]);
        store.add("B", Job::NIN, vec![2]);
        store.add("C", Job::BLM, vec![3]);

        let names = store.names();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&(Job::NIN, vec!["A".to_string(), "B".to_string()])));
        assert!(names.contains(&(Job::BLM, vec!["C".to_string()])));
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("openers.json");
        let stock = dir.path().join("stock.json");

        let mut store = OpenerStore::load(&user, &stock);
        store.add("Standard", Job::NIN, vec![2259, 2261, 2263]);
        store.save().unwrap();

        let reloaded = OpenerStore::load(&user, &stock);
        let opener = reloaded.get("Standard", Job::NIN).unwrap();
        assert_eq!(opener.slots, vec![2259, 2261, 2263]);
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path().join("openers.json");
        fs::write(&user, "not json").unwrap();

        let store = OpenerStore::load(&user, &dir.path().join("missing.json"));
        assert!(store.names().is_empty());
        assert!(store.default_names().is_empty());
    }

    #[test]
    fn test_defaults_are_separate_from_user_openers() {
        let dir = tempfile::tempdir().unwrap();
        let stock = dir.path().join("stock.json");
        fs::write(&stock, r#"{"NIN":{"Stock":[1,2,3]}}"#).unwrap();

        let store = OpenerStore::load(&dir.path().join("openers.json"), &stock);
        assert!(store.get_default("Stock", Job::NIN).is_some());
        assert!(store.get("Stock", Job::NIN).is_none());
    }
}
