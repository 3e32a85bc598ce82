//! Card grid
//!
//! Pagination only ever appends. A caught toggle patches one card through
//! the id index instead of rebuilding the grid.

use std::collections::HashMap;

use pokedex_types::{EntityId, EntitySummary};
use serde::Serialize;

use crate::catalog::ImageUrls;
use crate::command::UiAction;
use crate::selection::SelectionStore;

pub const CAUGHT_BADGE: &str = "Caught";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: EntityId,
    pub name: String,
    /// `#<id>`
    pub number_label: String,
    pub thumbnail_url: String,
    pub thumbnail_alt: String,
    pub aria_label: String,
    pub caught: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub action: UiAction,
}

impl CardView {
    pub fn new(entity: &EntitySummary, caught: bool, images: &ImageUrls) -> Self {
        let mut card = Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            number_label: entity.id.number_label(),
            thumbnail_url: images.thumbnail(&entity.id),
            thumbnail_alt: format!("{} thumbnail", entity.name),
            aria_label: format!("View details for {}", entity.name),
            caught: false,
            badge: None,
            action: UiAction::show_detail(&entity.id),
        };
        card.set_caught(caught);
        card
    }

    fn set_caught(&mut self, caught: bool) {
        self.caught = caught;
        self.badge = caught.then(|| CAUGHT_BADGE.to_string());
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GridView {
    cards: Vec<CardView>,
    #[serde(skip)]
    index: HashMap<EntityId, usize>,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one card per entity, in order. An id already on the grid is
    /// re-synced rather than duplicated.
    pub fn append_cards(
        &mut self,
        entities: &[EntitySummary],
        selection: &SelectionStore,
        images: &ImageUrls,
    ) -> usize {
        let mut added = 0;
        for entity in entities {
            if self.index.contains_key(&entity.id) {
                tracing::debug!(id = %entity.id, "Card already rendered, re-syncing");
                self.patch_card_selection(&entity.id, selection);
                continue;
            }
            self.index.insert(entity.id.clone(), self.cards.len());
            self.cards.push(CardView::new(
                entity,
                selection.is_selected(&entity.id),
                images,
            ));
            added += 1;
        }
        added
    }

    /// Sync one card's caught flag and badge with the selection. Returns
    /// `false` when the card has not been rendered.
    pub fn patch_card_selection(&mut self, id: &EntityId, selection: &SelectionStore) -> bool {
        let Some(&position) = self.index.get(id) else {
            return false;
        };
        if let Some(card) = self.cards.get_mut(position) {
            card.set_caught(selection.is_selected(id));
        }
        true
    }

    pub fn card(&self, id: &EntityId) -> Option<&CardView> {
        self.index.get(id).and_then(|&i| self.cards.get(i))
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::DEFAULT_STORAGE_KEY;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn images() -> ImageUrls {
        ImageUrls::new("https://thumbs", "https://art")
    }

    fn selection() -> SelectionStore {
        SelectionStore::new(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn test_append_keeps_order_and_is_additive() {
        let mut grid = GridView::new();
        let selection = selection();

        grid.append_cards(&[EntitySummary::new("1", "bulbasaur")], &selection, &images());
        grid.append_cards(
            &[
                EntitySummary::new("2", "ivysaur"),
                EntitySummary::new("3", "venusaur"),
            ],
            &selection,
            &images(),
        );

        let names: Vec<&str> = grid.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);

        let first = &grid.cards()[0];
        assert_eq!(first.number_label, "#1");
        assert_eq!(first.thumbnail_url, "https://thumbs/1.png");
        assert_eq!(first.aria_label, "View details for bulbasaur");
        assert_eq!(first.action, UiAction::show_detail(&EntityId::new("1")));
    }

    #[test]
    fn test_duplicate_id_is_not_appended_twice() {
        let mut grid = GridView::new();
        let selection = selection();
        let page = [EntitySummary::new("1", "bulbasaur")];

        assert_eq!(grid.append_cards(&page, &selection, &images()), 1);
        assert_eq!(grid.append_cards(&page, &selection, &images()), 0);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_patch_syncs_badge_and_is_idempotent() {
        let mut grid = GridView::new();
        let mut selection = selection();
        let id = EntityId::new("4");
        grid.append_cards(&[EntitySummary::new("4", "charmander")], &selection, &images());

        selection.toggle(&id).unwrap();
        assert!(grid.patch_card_selection(&id, &selection));
        let once = grid.card(&id).cloned().unwrap();
        assert!(once.caught);
        assert_eq!(once.badge.as_deref(), Some(CAUGHT_BADGE));

        grid.patch_card_selection(&id, &selection);
        assert_eq!(grid.card(&id), Some(&once));

        selection.toggle(&id).unwrap();
        grid.patch_card_selection(&id, &selection);
        let card = grid.card(&id).unwrap();
        assert!(!card.caught);
        assert_eq!(card.badge, None);
    }

    #[test]
    fn test_patch_unknown_card_is_noop() {
        let mut grid = GridView::new();
        assert!(!grid.patch_card_selection(&EntityId::new("99"), &selection()));
        assert!(grid.is_empty());
    }
}
