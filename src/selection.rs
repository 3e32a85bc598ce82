//! Caught-list selection store
//!
//! The set of caught ids lives in memory and is rewritten in full to the
//! key-value store after every toggle. Loading is best effort: a missing key
//! or an unparseable value leaves the set empty.

use std::collections::HashSet;
use std::sync::Arc;

use pokedex_types::EntityId;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key for the caught list
pub const DEFAULT_STORAGE_KEY: &str = "pokedex-caught";

pub struct SelectionStore {
    ids: HashSet<EntityId>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("ids", &self.ids)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl SelectionStore {
    /// Empty store; call [`load`](Self::load) to read persisted ids
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            ids: HashSet::new(),
            storage,
            key: key.into(),
        }
    }

    /// Replace the in-memory set with the persisted one.
    ///
    /// Absent key: set untouched. Unreadable or unparseable value: logged and
    /// set untouched.
    pub fn load(&mut self) {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No caught list persisted yet");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read caught Pokémon from storage");
                return;
            }
        };

        match parse_ids(&self.key, &raw) {
            Ok(ids) => {
                tracing::debug!(count = ids.len(), "Loaded caught list");
                self.ids = ids;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse caught Pokémon from storage");
            }
        }
    }

    /// Overwrite the persisted value with the full current set
    pub fn save(&self) -> Result<(), StorageError> {
        let payload = serialize_ids(&self.sorted_ids()).map_err(|e| StorageError::Persist {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.storage.set_item(&self.key, &payload)
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership of `id` and persist.
    ///
    /// The in-memory flip always happens; a persist failure is returned after
    /// it so the caller can keep rendering consistent with memory.
    pub fn toggle(&mut self, id: &EntityId) -> Result<bool, StorageError> {
        let selected = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        };
        tracing::debug!(id = %id, selected, "Toggled caught state");
        self.save()?;
        Ok(selected)
    }

    /// Ids in display order (numeric ascending, non-numeric last)
    pub fn sorted_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.ids.iter().cloned().collect();
        ids.sort_by(EntityId::display_cmp);
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn serialize_ids(ids: &[EntityId]) -> serde_json::Result<String> {
    serde_json::to_string(ids)
}

/// Parse a persisted value: a JSON array whose string/number elements become
/// ids. Other elements are skipped.
pub fn parse_ids(key: &str, raw: &str) -> Result<HashSet<EntityId>, StorageError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| StorageError::Parse {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
    let elements = value.as_array().ok_or_else(|| StorageError::Parse {
        key: key.to_string(),
        reason: "expected a JSON array".to_string(),
    })?;

    let mut ids = HashSet::with_capacity(elements.len());
    for element in elements {
        match EntityId::from_json(element) {
            Some(id) => {
                ids.insert(id);
            }
            None => tracing::warn!(element = %element, "Skipping non-scalar caught id"),
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store_with(raw: Option<&str>) -> (SelectionStore, MemoryStore) {
        let backing = match raw {
            Some(raw) => MemoryStore::new().with_item(DEFAULT_STORAGE_KEY, raw),
            None => MemoryStore::new(),
        };
        let mut store = SelectionStore::new(Arc::new(backing.clone()), DEFAULT_STORAGE_KEY);
        store.load();
        (store, backing)
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let (store, _) = store_with(None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_value_is_empty() {
        let (store, _) = store_with(Some("{not json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_non_array_is_empty() {
        let (store, _) = store_with(Some(r#"{"1": true}"#));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_coerces_numbers_and_dedupes() {
        let (store, _) = store_with(Some(r#"["1", 1, " 4 ", null, "007"]"#));
        assert_eq!(store.len(), 3);
        assert!(store.is_selected(&EntityId::new("1")));
        assert!(store.is_selected(&EntityId::new("4")));
        assert!(store.is_selected(&EntityId::new("007")));
        assert!(!store.is_selected(&EntityId::new("7")));
    }

    #[test]
    fn test_load_whole_float_ids_match_integer_ids() {
        let (store, _) = store_with(Some(r#"[1.0, 1e3, "1"]"#));
        assert_eq!(store.len(), 2);
        assert!(store.is_selected(&EntityId::new("1")));
        assert!(store.is_selected(&EntityId::new("1000")));
    }

    #[test]
    fn test_corrupt_load_keeps_existing_set() {
        let backing = MemoryStore::new().with_item(DEFAULT_STORAGE_KEY, r#"["3"]"#);
        let mut store = SelectionStore::new(Arc::new(backing.clone()), DEFAULT_STORAGE_KEY);
        store.load();
        backing.set_item(DEFAULT_STORAGE_KEY, "oops").unwrap();
        store.load();
        assert!(store.is_selected(&EntityId::new("3")));
    }

    #[test]
    fn test_toggle_persists_full_array() {
        let (mut store, backing) = store_with(None);
        assert!(store.toggle(&EntityId::new("10")).unwrap());
        assert!(store.toggle(&EntityId::new("2")).unwrap());
        assert_eq!(
            backing.raw(DEFAULT_STORAGE_KEY).as_deref(),
            Some(r#"["2","10"]"#)
        );

        assert!(!store.toggle(&EntityId::new("10")).unwrap());
        assert_eq!(backing.raw(DEFAULT_STORAGE_KEY).as_deref(), Some(r#"["2"]"#));
    }

    #[test]
    fn test_toggle_with_failed_write_still_flips_memory() {
        let (mut store, backing) = store_with(None);
        backing.reject_writes(true);

        let err = store.toggle(&EntityId::new("25")).unwrap_err();
        assert!(matches!(err, StorageError::Persist { .. }));
        assert!(store.is_selected(&EntityId::new("25")));
        assert_eq!(backing.raw(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_sorted_ids_numeric_not_lexical() {
        let (mut store, _) = store_with(None);
        store.toggle(&EntityId::new("10")).unwrap();
        store.toggle(&EntityId::new("2")).unwrap();
        let ids: Vec<String> = store.sorted_ids().into_iter().map(String::from).collect();
        assert_eq!(ids, vec!["2", "10"]);
    }
}
