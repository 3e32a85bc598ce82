//! Local key-value storage
//!
//! String keys to raw string values, the same contract as browser
//! `localStorage`. The file backend keeps every key in one JSON object and
//! replaces the file atomically on each write.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// FILE BACKEND
// =============================================================================

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; a missing file is `None`
    fn read_raw(&self) -> std::io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn decode(&self, raw: &str) -> Result<BTreeMap<String, String>, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(raw)
    }

    /// Current items to extend on write. A file that cannot be read fails the
    /// write; a file that reads but does not parse is replaced.
    fn items_for_write(
        &self,
        key: &str,
        raw: std::io::Result<Option<String>>,
    ) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match raw {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::Persist {
                    key: key.to_string(),
                    reason: format!("{}: {}", self.path.display(), e),
                })
            }
        };
        match self.decode(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Storage file corrupt, starting fresh");
                Ok(BTreeMap::new())
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let raw = self.read_raw().map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: format!("{}: {}", self.path.display(), e),
        })?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let mut items = self.decode(&raw).map_err(|e| StorageError::Parse {
            key: key.to_string(),
            reason: format!("{}: {}", self.path.display(), e),
        })?;
        Ok(items.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let persist_err = |reason: String| StorageError::Persist {
            key: key.to_string(),
            reason,
        };

        let mut items = self.items_for_write(key, self.read_raw())?;
        items.insert(key.to_string(), value.to_string());
        let body = serde_json::to_string_pretty(&items).map_err(|e| persist_err(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| persist_err(e.to_string()))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(&dir).map_err(|e| persist_err(e.to_string()))?;
        tmp.write_all(body.as_bytes())
            .map_err(|e| persist_err(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| persist_err(e.error.to_string()))?;

        tracing::debug!(path = %self.path.display(), key, "Storage written");
        Ok(())
    }
}

// =============================================================================
// IN-MEMORY BACKEND
// =============================================================================

/// Shared in-memory store; clones see the same items
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
    reject_writes: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any write rejection
    pub fn with_item(self, key: &str, value: &str) -> Self {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Make every subsequent `set_item` fail, as a full quota would
    pub fn reject_writes(&self, reject: bool) {
        if let Ok(mut flag) = self.reject_writes.lock() {
            *flag = reject;
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().ok().and_then(|items| items.get(key).cloned())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let rejected = self.reject_writes.lock().map(|flag| *flag).unwrap_or(false);
        if rejected {
            return Err(StorageError::Persist {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        let mut items = self.items.lock().map_err(|e| StorageError::Persist {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get_item("pokedex-caught").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("storage.json"));

        store.set_item("pokedex-caught", r#"["1","4"]"#).unwrap();
        store.set_item("other", "x").unwrap();

        assert_eq!(
            store.get_item("pokedex-caught").unwrap().as_deref(),
            Some(r#"["1","4"]"#)
        );
        assert_eq!(store.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_file_store_overwrites_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);

        assert!(matches!(
            store.get_item("pokedex-caught"),
            Err(StorageError::Parse { .. })
        ));
        store.set_item("pokedex-caught", "[]").unwrap();
        assert_eq!(store.get_item("pokedex-caught").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_unreadable_file_fails_write() {
        let store = FileStore::new("storage.json");
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        let err = store.items_for_write("pokedex-caught", Err(denied)).unwrap_err();
        assert!(matches!(err, StorageError::Persist { .. }));
        assert!(store
            .items_for_write("pokedex-caught", Ok(Some("{not json".to_string())))
            .unwrap()
            .is_empty());
        assert!(store.items_for_write("pokedex-caught", Ok(None)).unwrap().is_empty());
    }

    #[test]
    fn test_file_store_directory_path_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(
            store.get_item("pokedex-caught"),
            Err(StorageError::Read { .. })
        ));
        assert!(matches!(
            store.set_item("pokedex-caught", "[]"),
            Err(StorageError::Persist { .. })
        ));
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_memory_store_clones_share_items() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set_item("k", "v").unwrap();
        assert_eq!(handle.raw("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store_rejected_write_keeps_old_value() {
        let store = MemoryStore::new().with_item("k", "old");
        store.reject_writes(true);
        assert!(matches!(
            store.set_item("k", "new"),
            Err(StorageError::Persist { .. })
        ));
        assert_eq!(store.raw("k").as_deref(), Some("old"));
    }
}
