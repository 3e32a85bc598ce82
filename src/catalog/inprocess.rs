//! In-process catalog serving canned responses.
//!
//! Unknown cursors and ids answer like a 404; a detail can be pinned to any
//! failing status.

use std::collections::HashMap;

use async_trait::async_trait;
use pokedex_types::{DetailResponse, EntityDetail, EntityId, ListPageResponse};

use super::{CatalogPage, CatalogSource};
use crate::error::CatalogError;

#[derive(Debug, Clone, Default)]
pub struct InProcessCatalog {
    pages: HashMap<String, ListPageResponse>,
    details: HashMap<EntityId, Result<DetailResponse, u16>>,
}

impl InProcessCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, cursor: &str, page: ListPageResponse) -> Self {
        self.pages.insert(cursor.to_string(), page);
        self
    }

    pub fn with_detail(mut self, id: &str, detail: DetailResponse) -> Self {
        self.details.insert(EntityId::new(id), Ok(detail));
        self
    }

    pub fn with_detail_status(mut self, id: &str, status: u16) -> Self {
        self.details.insert(EntityId::new(id), Err(status));
        self
    }
}

#[async_trait]
impl CatalogSource for InProcessCatalog {
    async fn fetch_page(&self, cursor: &str) -> Result<CatalogPage, CatalogError> {
        self.pages
            .get(cursor)
            .cloned()
            .map(CatalogPage::from_response)
            .ok_or_else(|| CatalogError::ListFetch {
                url: cursor.to_string(),
                reason: "HTTP 404".to_string(),
            })
    }

    async fn fetch_detail(&self, id: &EntityId) -> Result<EntityDetail, CatalogError> {
        match self.details.get(id) {
            Some(Ok(detail)) => Ok(EntityDetail::from_response(id.clone(), detail.clone())),
            Some(Err(status)) => Err(CatalogError::DetailFetch {
                id: id.to_string(),
                reason: format!("HTTP {}", status),
            }),
            None => Err(CatalogError::DetailFetch {
                id: id.to_string(),
                reason: "HTTP 404".to_string(),
            }),
        }
    }
}
