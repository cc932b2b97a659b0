//! Persistence of item statuses.
//!
//! This module provides the storage behind the checklist state:
//! - The [`ItemStore`] interface the application state talks to
//! - A JSON file store with versioned schema migration
//! - An in-memory store for tests and ephemeral sessions

mod error;

pub use error::StoreError;

use crate::state::{ItemStateMap, ItemStatus};
use log::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Schema version written by this build.
///
pub const SCHEMA_VERSION: u32 = 2;

/// Storage for item statuses.
///
pub trait ItemStore {
    /// Return the saved statuses, or `None` if nothing usable is stored.
    fn load(&self) -> Option<ItemStateMap>;

    /// Persist the statuses. Returns whether the write succeeded.
    fn save(&self, items: &ItemStateMap) -> bool;

    /// Remove everything stored. Returns whether the removal succeeded.
    fn clear(&self) -> bool;
}

/// Define specification for the state file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    version: u32,
    #[serde(default)]
    saved_at: Option<String>,
    items: ItemStateMap,
}

/// First schema: items were only ever checked or not.
///
#[derive(Deserialize)]
struct LegacyFileSpec {
    #[serde(default)]
    items: BTreeMap<String, BTreeMap<String, BTreeMap<String, bool>>>,
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// Stores item statuses as JSON on disk.
///
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        FileStore {
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Read and migrate the state file. A missing file is `Ok(None)`.
    ///
    pub fn read(&self) -> Result<Option<ItemStateMap>, StoreError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&self.file_path).map_err(|e| StoreError::ReadFailed {
                path: self.file_path.clone(),
                source: e,
            })?;
        parse(&contents).map(Some)
    }

    /// Serialize the statuses and write them to disk.
    ///
    pub fn write(&self, items: &ItemStateMap) -> Result<(), StoreError> {
        let data = FileSpec {
            version: SCHEMA_VERSION,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            items: items.clone(),
        };
        let content = serde_json::to_string_pretty(&data)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let write_err = |e| StoreError::WriteFailed {
            path: self.file_path.clone(),
            source: e,
        };
        let mut file = fs::File::create(&self.file_path).map_err(write_err)?;
        write!(file, "{}", content).map_err(write_err)?;
        file.flush().map_err(write_err)?;
        Ok(())
    }
}

impl ItemStore for FileStore {
    fn load(&self) -> Option<ItemStateMap> {
        match self.read() {
            Ok(Some(items)) => {
                debug!(
                    "Loaded {} item statuses from {}",
                    items.len(),
                    self.file_path.display()
                );
                Some(items)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring saved state: {}", e);
                None
            }
        }
    }

    fn save(&self, items: &ItemStateMap) -> bool {
        match self.write(items) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save state: {}", e);
                false
            }
        }
    }

    fn clear(&self) -> bool {
        if !self.file_path.exists() {
            return true;
        }
        match fs::remove_file(&self.file_path) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to remove state file {}: {}",
                    self.file_path.display(),
                    e
                );
                false
            }
        }
    }
}

/// Parse any known schema version into the current item map.
///
fn parse(contents: &str) -> Result<ItemStateMap, StoreError> {
    let header: VersionHeader =
        serde_json::from_str(contents).map_err(|e| StoreError::ParseFailed(e.to_string()))?;
    match header.version {
        1 => {
            let legacy: LegacyFileSpec = serde_json::from_str(contents)
                .map_err(|e| StoreError::ParseFailed(e.to_string()))?;
            info!("Migrating saved state from schema version 1");
            Ok(migrate_v1(legacy))
        }
        SCHEMA_VERSION => {
            let data: FileSpec = serde_json::from_str(contents)
                .map_err(|e| StoreError::ParseFailed(e.to_string()))?;
            Ok(data.items)
        }
        version => Err(StoreError::UnsupportedVersion(version)),
    }
}

fn migrate_v1(legacy: LegacyFileSpec) -> ItemStateMap {
    let mut items = ItemStateMap::new();
    for (category_id, checklists) in &legacy.items {
        for (checklist_id, statuses) in checklists {
            for (item_id, checked) in statuses {
                if *checked {
                    items.set_status(category_id, checklist_id, item_id, ItemStatus::Checked);
                }
            }
        }
    }
    items
}

/// Keeps item statuses in memory. Clones share the same storage.
///
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<Option<ItemStateMap>>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Return a store pre-populated with the given statuses.
    ///
    pub fn with_items(items: ItemStateMap) -> Self {
        MemoryStore {
            items: Rc::new(RefCell::new(Some(items))),
            read_only: false,
        }
    }

    /// Return a store whose saves always fail.
    ///
    pub fn read_only() -> Self {
        MemoryStore {
            read_only: true,
            ..MemoryStore::default()
        }
    }

    /// Return the last saved statuses.
    ///
    pub fn saved(&self) -> Option<ItemStateMap> {
        self.items.borrow().clone()
    }
}

impl ItemStore for MemoryStore {
    fn load(&self) -> Option<ItemStateMap> {
        self.saved()
    }

    fn save(&self, items: &ItemStateMap) -> bool {
        if self.read_only {
            return false;
        }
        *self.items.borrow_mut() = Some(items.clone());
        true
    }

    fn clear(&self) -> bool {
        if self.read_only {
            return false;
        }
        *self.items.borrow_mut() = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ItemStateMap {
        let mut items = ItemStateMap::new();
        items
            .set_status("preflight", "main", "brakes", ItemStatus::Checked)
            .set_status("preflight", "main", "fuel", ItemStatus::CheckedOverridden);
        items
    }

    #[test]
    fn test_file_store_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        assert_eq!(store.load(), None);
        assert!(store.clear());
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state.json"));
        assert!(store.save(&sample()));
        assert_eq!(store.load(), Some(sample()));

        let contents = fs::read_to_string(store.file_path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["version"], SCHEMA_VERSION);
        assert!(json["saved_at"].is_string());

        assert!(store.clear());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_migrates_version_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"version":1,"items":{"preflight":{"main":{"brakes":true,"fuel":false}}}}"#,
        )
        .unwrap();
        let items = FileStore::new(&path).load().unwrap();
        assert_eq!(items.status("preflight", "main", "brakes"), ItemStatus::Checked);
        assert_eq!(items.status("preflight", "main", "fuel"), ItemStatus::Unchecked);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_rejects_unknown_version_and_garbage() {
        assert!(matches!(
            parse(r#"{"version":7,"items":{}}"#),
            Err(StoreError::UnsupportedVersion(7))
        ));
        assert!(matches!(parse("not json"), Err(StoreError::ParseFailed(_))));
        assert!(matches!(
            parse(r#"{"version":2,"items":{"a":{"b":{"c":"skipped"}}}}"#),
            Err(StoreError::ParseFailed(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{").unwrap();
        assert_eq!(FileStore::new(&path).load(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), None);
        let shared = store.clone();
        assert!(store.save(&sample()));
        assert_eq!(shared.saved(), Some(sample()));
        assert!(store.clear());
        assert_eq!(shared.load(), None);

        let read_only = MemoryStore::read_only();
        assert!(!read_only.save(&sample()));
        assert_eq!(read_only.load(), None);
    }
}
