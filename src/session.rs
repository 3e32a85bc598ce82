//! Pokedex session
//!
//! Single owner of all mutable browser state: selection, registry, page
//! cursor and the three views. Every mutation goes through `&mut self`, so a
//! second page load cannot start while one is awaiting its response.

use std::sync::Arc;

use pokedex_types::EntityId;

use crate::catalog::{CatalogSource, HttpCatalogClient, ImageUrls};
use crate::config::PokedexConfig;
use crate::error::Result;
use crate::registry::EntityRegistry;
use crate::selection::SelectionStore;
use crate::storage::{FileStore, KeyValueStore};
use crate::view::{DetailPanel, DetailView, GridView, SelectionListView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Loaded { added: usize, exhausted: bool },
    /// No cursor left; nothing was requested
    Exhausted,
    /// Request failed; the cursor is unchanged
    Failed,
}

/// Result of pressing a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub id: EntityId,
    pub selected: bool,
    /// Set when the new state could not be written to storage
    pub persist_error: Option<String>,
}

pub struct PokedexSession {
    images: ImageUrls,
    source: Arc<dyn CatalogSource>,
    selection: SelectionStore,
    registry: EntityRegistry,
    cursor: Option<String>,
    grid: GridView,
    caught_list: SelectionListView,
    detail: DetailPanel,
}

impl PokedexSession {
    /// Build the session, load the persisted selection and render the list.
    /// No page is fetched until [`load_more`](Self::load_more).
    pub fn new(
        config: &PokedexConfig,
        source: Arc<dyn CatalogSource>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let mut session = Self {
            images: config.image_urls(),
            source,
            selection: SelectionStore::new(storage, config.storage_key.clone()),
            registry: EntityRegistry::new(),
            cursor: Some(config.first_page_url()),
            grid: GridView::new(),
            caught_list: SelectionListView::new(),
            detail: DetailPanel::default(),
        };
        session.selection.load();
        session.render_caught_list();
        tracing::info!(caught = session.selection.len(), "Session initialized");
        session
    }

    /// Session over the configured HTTP catalog and storage file
    pub fn open(config: &PokedexConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpCatalogClient::new(config)?;
        let storage = FileStore::new(&config.storage_path);
        tracing::debug!(path = %storage.path().display(), "Using storage file");
        Ok(Self::new(config, Arc::new(client), Arc::new(storage)))
    }

    /// Fetch the page at the cursor and append it to the grid
    pub async fn load_more(&mut self) -> PageOutcome {
        let Some(cursor) = self.cursor.clone() else {
            tracing::debug!("Catalog exhausted, not fetching");
            return PageOutcome::Exhausted;
        };

        let fetched = self.source.fetch_page(&cursor).await;
        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load Pokémon list");
                return PageOutcome::Failed;
            }
        };

        self.cursor = page.next;
        for entity in &page.entities {
            self.registry.put(&entity.id, &entity.name);
        }
        let added = self
            .grid
            .append_cards(&page.entities, &self.selection, &self.images);
        self.render_caught_list();

        tracing::info!(added, next = ?self.cursor, "Loaded catalog page");
        PageOutcome::Loaded {
            added,
            exhausted: self.cursor.is_none(),
        }
    }

    /// Load one entity into the detail panel; failures become the placeholder
    pub async fn show_detail(&mut self, id: &EntityId) {
        self.detail.begin(id);

        let fetched = self.source.fetch_detail(id).await;
        let result = match fetched {
            Ok(detail) => {
                if self.registry.put(id, &detail.name) {
                    self.render_caught_list();
                }
                Ok(DetailView::build(
                    &detail,
                    self.selection.is_selected(id),
                    &self.images,
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load Pokémon details");
                Err(e.to_string())
            }
        };
        self.detail.finish(id, result);
    }

    /// Flip caught state, persist, and sync grid card, list and panel button
    pub fn toggle(&mut self, id: &EntityId) -> Toggled {
        let persist_error = match self.selection.toggle(id) {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Caught list not persisted");
                Some(e.to_string())
            }
        };
        let selected = self.selection.is_selected(id);

        self.grid.patch_card_selection(id, &self.selection);
        self.render_caught_list();
        self.detail.sync_toggle(id, selected);

        Toggled {
            id: id.clone(),
            selected,
            persist_error,
        }
    }

    fn render_caught_list(&mut self) {
        self.caught_list.render(&self.selection, &self.registry);
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn caught_list(&self) -> &SelectionListView {
        &self.caught_list
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }
}
