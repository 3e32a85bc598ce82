//! HTTP catalog client (reqwest)

use std::time::Duration;

use async_trait::async_trait;
use pokedex_types::{DetailResponse, EntityDetail, EntityId, ListPageResponse};
use reqwest::Client;

use super::{detail_url, CatalogPage, CatalogSource};
use crate::config::PokedexConfig;
use crate::error::CatalogError;

pub struct HttpCatalogClient {
    client: Client,
    detail_endpoint: String,
}

impl HttpCatalogClient {
    pub fn new(config: &PokedexConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            client,
            detail_endpoint: config.detail_endpoint.clone(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_page(&self, cursor: &str) -> Result<CatalogPage, CatalogError> {
        let list_err = |reason: String| CatalogError::ListFetch {
            url: cursor.to_string(),
            reason,
        };

        tracing::debug!(url = %cursor, "Fetching catalog page");
        let response = self
            .client
            .get(cursor)
            .send()
            .await
            .map_err(|e| list_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(list_err(format!("HTTP {}", status)));
        }

        let body: ListPageResponse = response
            .json()
            .await
            .map_err(|e| list_err(format!("invalid list body: {}", e)))?;

        Ok(CatalogPage::from_response(body))
    }

    async fn fetch_detail(&self, id: &EntityId) -> Result<EntityDetail, CatalogError> {
        let detail_err = |reason: String| CatalogError::DetailFetch {
            id: id.to_string(),
            reason,
        };

        let url = detail_url(&self.detail_endpoint, id);
        tracing::debug!(%url, "Fetching catalog detail");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| detail_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(detail_err(format!("HTTP {}", status)));
        }

        let body: DetailResponse = response
            .json()
            .await
            .map_err(|e| detail_err(format!("invalid detail body: {}", e)))?;

        Ok(EntityDetail::from_response(id.clone(), body))
    }
}
