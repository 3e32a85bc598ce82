//! Remote catalog access
//!
//! [`CatalogSource`] is the only boundary between the session and the remote
//! API. [`HttpCatalogClient`] talks to the real endpoint, [`InProcessCatalog`]
//! serves canned responses.

pub mod http;
pub mod inprocess;

use async_trait::async_trait;
use pokedex_types::{EntityDetail, EntityId, EntitySummary, ListPageResponse};
use url::Url;

use crate::error::CatalogError;

pub use http::HttpCatalogClient;
pub use inprocess::InProcessCatalog;

/// One page of the catalog list
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub entities: Vec<EntitySummary>,
    /// `None` once the list is exhausted
    pub next: Option<String>,
}

impl CatalogPage {
    pub fn from_response(response: ListPageResponse) -> Self {
        Self {
            entities: response
                .results
                .into_iter()
                .map(|entry| EntitySummary {
                    id: extract_id(&entry.url),
                    name: entry.name,
                })
                .collect(),
            next: response.next.filter(|next| !next.trim().is_empty()),
        }
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the page at `cursor`, a URL requested verbatim
    async fn fetch_page(&self, cursor: &str) -> Result<CatalogPage, CatalogError>;

    async fn fetch_detail(&self, id: &EntityId) -> Result<EntityDetail, CatalogError>;
}

/// Last non-empty path segment of a resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon/1/` gives `1`. Inputs that are not
/// absolute URLs are split on `/`. No segment at all gives the empty id.
pub fn extract_id(resource_url: &str) -> EntityId {
    let segment = match Url::parse(resource_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_owned),
        Err(_) => resource_url
            .split('?')
            .next()
            .and_then(|path| path.split('/').filter(|s| !s.is_empty()).last())
            .map(str::to_owned),
    };
    EntityId::new(segment.unwrap_or_default())
}

/// `{detail_endpoint}/{id}/`
pub fn detail_url(detail_endpoint: &str, id: &EntityId) -> String {
    format!("{}/{}/", detail_endpoint.trim_end_matches('/'), id)
}

/// Sprite URL builder; no existence check is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    thumbnail_base: String,
    artwork_base: String,
}

impl ImageUrls {
    pub fn new(thumbnail_base: &str, artwork_base: &str) -> Self {
        Self {
            thumbnail_base: thumbnail_base.trim_end_matches('/').to_string(),
            artwork_base: artwork_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn thumbnail(&self, id: &EntityId) -> String {
        format!("{}/{}.png", self.thumbnail_base, id)
    }

    pub fn artwork(&self, id: &EntityId) -> String {
        format!("{}/{}.png", self.artwork_base, id)
    }
}
