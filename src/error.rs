//! Error types for the pokedex system
//!
//! Catalog failures are caught by the session and turned into a log line or a
//! placeholder panel; storage parse failures recover to an empty selection.
//! Only configuration errors are expected to reach the binary's top level.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pokedex system
#[derive(Error, Debug)]
pub enum PokedexError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Remote catalog failures
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to load Pokémon list from {url}: {reason}")]
    ListFetch { url: String, reason: String },

    #[error("Failed to load Pokémon details for #{id}: {reason}")]
    DetailFetch { id: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Local key-value storage failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read '{key}' from storage: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to persist '{key}' to storage: {reason}")]
    Persist { key: String, reason: String },

    #[error("Stored value for '{key}' is not a JSON array of ids: {reason}")]
    Parse { key: String, reason: String },
}

/// Action dispatch failures
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("Action '{action}' needs a target id")]
    MissingTarget { action: String },
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, PokedexError>;
