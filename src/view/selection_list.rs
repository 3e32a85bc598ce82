//! Caught list: fully rebuilt from the selection on every change

use pokedex_types::EntityId;
use serde::Serialize;

use crate::command::UiAction;
use crate::registry::EntityRegistry;
use crate::selection::SelectionStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionListItem {
    pub id: EntityId,
    /// Registry name, or `#<id>` when the name is not known yet
    pub label: String,
    pub action: UiAction,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionListView {
    items: Vec<SelectionListItem>,
    count: usize,
}

impl SelectionListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, selection: &SelectionStore, registry: &EntityRegistry) {
        self.items = selection
            .sorted_ids()
            .into_iter()
            .map(|id| SelectionListItem {
                label: registry
                    .name_of(&id)
                    .map(str::to_owned)
                    .unwrap_or_else(|| id.number_label()),
                action: UiAction::show_detail(&id),
                id,
            })
            .collect();
        self.count = selection.len();
    }

    pub fn items(&self) -> &[SelectionListItem] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
