//! Entity registry: id -> summary, filled as pages and details arrive

use std::collections::HashMap;

use pokedex_types::{EntityId, EntitySummary};

#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entries: HashMap<EntityId, EntitySummary>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &EntityId) -> Option<&EntitySummary> {
        self.entries.get(id)
    }

    /// Insert if absent. An existing non-blank name is never replaced; a blank
    /// one is backfilled. Returns whether the registry changed.
    pub fn put(&mut self, id: &EntityId, name: &str) -> bool {
        match self.entries.get_mut(id) {
            Some(existing) if existing.name.trim().is_empty() && !name.trim().is_empty() => {
                existing.name = name.to_string();
                true
            }
            Some(_) => false,
            None => {
                self.entries
                    .insert(id.clone(), EntitySummary::new(id.clone(), name));
                true
            }
        }
    }

    pub fn name_of(&self, id: &EntityId) -> Option<&str> {
        self.get(id)
            .map(|entry| entry.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_is_first_write_wins() {
        let mut registry = EntityRegistry::new();
        let id = EntityId::new("1");

        assert!(registry.put(&id, "bulbasaur"));
        assert!(!registry.put(&id, "BULBASAUR"));
        assert_eq!(registry.name_of(&id), Some("bulbasaur"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_blank_name_is_backfilled() {
        let mut registry = EntityRegistry::new();
        let id = EntityId::new("4");

        registry.put(&id, "");
        assert_eq!(registry.name_of(&id), None);
        assert!(registry.put(&id, "charmander"));
        assert_eq!(registry.name_of(&id), Some("charmander"));
    }
}
