//! Pokedex configuration
//!
//! Built-in defaults point at the public PokeAPI and its sprite repository.
//! A YAML file may override any field, and a handful of environment variables
//! override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::ImageUrls;
use crate::error::ConfigError;
use crate::selection::DEFAULT_STORAGE_KEY;

const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2/pokemon";
const DEFAULT_THUMBNAIL_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
const DEFAULT_ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";
const DEFAULT_STORAGE_PATH: &str = "pokedex-storage.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokedexConfig {
    /// Paginated list endpoint (`?offset=&limit=` is appended for the first page)
    pub list_endpoint: String,
    /// Detail endpoint (`/{id}/` is appended)
    pub detail_endpoint: String,
    pub thumbnail_base: String,
    pub artwork_base: String,
    pub page_size: usize,
    /// JSON file backing the key-value storage
    pub storage_path: PathBuf,
    pub storage_key: String,
    pub request_timeout_secs: u64,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            list_endpoint: DEFAULT_API_BASE.to_string(),
            detail_endpoint: DEFAULT_API_BASE.to_string(),
            thumbnail_base: DEFAULT_THUMBNAIL_BASE.to_string(),
            artwork_base: DEFAULT_ARTWORK_BASE.to_string(),
            page_size: 20,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl PokedexConfig {
    /// Load a YAML config file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the optional file, then process environment; validated
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `POKEDEX_API_BASE`, `POKEDEX_STORAGE` and `POKEDEX_PAGE_SIZE`
    /// through the given lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("POKEDEX_API_BASE") {
            self.list_endpoint = base.clone();
            self.detail_endpoint = base;
        }
        if let Some(path) = lookup("POKEDEX_STORAGE") {
            self.storage_path = PathBuf::from(path);
        }
        if let Some(size) = lookup("POKEDEX_PAGE_SIZE") {
            self.page_size = size.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("POKEDEX_PAGE_SIZE must be a number, got '{size}'"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.list_endpoint.trim().is_empty() || self.detail_endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog endpoints must not be empty".into()));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }
        Ok(())
    }

    /// Cursor for the very first page
    pub fn first_page_url(&self) -> String {
        format!(
            "{}?offset=0&limit={}",
            self.list_endpoint.trim_end_matches('/'),
            self.page_size
        )
    }

    pub fn image_urls(&self) -> ImageUrls {
        ImageUrls::new(&self.thumbnail_base, &self.artwork_base)
    }
}
