//! Property tests for the caught-list store

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use pokedex::selection::{parse_ids, SelectionStore, DEFAULT_STORAGE_KEY};
use pokedex::types::EntityId;
use pokedex::{FileStore, KeyValueStore, MemoryStore};

fn id_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,4}", "[a-z][a-z0-9-]{0,7}"]
}

proptest! {
    #[test]
    fn toggle_parity_decides_membership(toggles in 0usize..12, other in prop::collection::vec(id_strategy(), 0..6)) {
        let mut store = SelectionStore::new(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY);
        let target = EntityId::new("25");
        for i in 0..toggles {
            store.toggle(&target).unwrap();
            if let Some(noise) = other.get(i) {
                if noise != "25" {
                    store.toggle(&EntityId::new(noise)).unwrap();
                }
            }
        }
        prop_assert_eq!(store.is_selected(&target), toggles % 2 == 1);
    }

    #[test]
    fn load_after_save_round_trips(ids in prop::collection::hash_set(id_strategy(), 0..20)) {
        let backing = MemoryStore::new();
        let mut writer = SelectionStore::new(Arc::new(backing.clone()), DEFAULT_STORAGE_KEY);
        for id in &ids {
            writer.toggle(&EntityId::new(id)).unwrap();
        }
        writer.save().unwrap();

        let mut reader = SelectionStore::new(Arc::new(backing.clone()), DEFAULT_STORAGE_KEY);
        reader.load();

        let loaded: HashSet<String> = reader.sorted_ids().into_iter().map(String::from).collect();
        prop_assert_eq!(loaded, ids);

        let raw = backing.raw(DEFAULT_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        prop_assert!(value.as_array().unwrap().iter().all(|v| v.is_string()));
    }

    #[test]
    fn stored_form_matches_displayed_form(ids in prop::collection::hash_set("0{0,2}[0-9]{1,3}", 1..10)) {
        let raw = serde_json::to_string(&ids).unwrap();
        let parsed = parse_ids(DEFAULT_STORAGE_KEY, &raw).unwrap();
        let shown: HashSet<String> = parsed.iter().map(|id| id.as_str().to_owned()).collect();
        prop_assert_eq!(shown, ids);
    }
}

#[test]
fn file_backed_selection_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut first = SelectionStore::new(Arc::new(FileStore::new(&path)), DEFAULT_STORAGE_KEY);
    first.load();
    first.toggle(&EntityId::new("10")).unwrap();
    first.toggle(&EntityId::new("2")).unwrap();

    let mut second = SelectionStore::new(Arc::new(FileStore::new(&path)), DEFAULT_STORAGE_KEY);
    second.load();
    let ids: Vec<String> = second.sorted_ids().into_iter().map(String::from).collect();
    assert_eq!(ids, vec!["2", "10"]);

    let raw = FileStore::new(&path).get_item(DEFAULT_STORAGE_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some(r#"["2","10"]"#));
}
