//! Pokedex - paginated catalog browser with a persisted caught list
//!
//! Pages through a remote catalog, keeps a grid of cards, loads one entry's
//! detail on demand and lets the user mark entries as caught. The caught set
//! is persisted to local key-value storage after every change.
//!
//! ## Flow
//! Action -> CommandTable -> PokedexSession -> CatalogSource / SelectionStore
//! -> GridView / SelectionListView / DetailPanel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pokedex::{PokedexConfig, PokedexSession};
//!
//! # async fn run() -> pokedex::Result<()> {
//! let config = PokedexConfig::load(None)?;
//! let mut session = PokedexSession::open(&config)?;
//! session.load_more().await;
//! println!("{} cards", session.grid().len());
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

pub mod config;

// Remote catalog client and canned in-process source
pub mod catalog;

// Local persistence
pub mod registry;
pub mod selection;
pub mod storage;

// View models and terminal rendering
pub mod view;

// State owner and action dispatch
pub mod command;
pub mod session;

pub use catalog::{CatalogPage, CatalogSource, HttpCatalogClient, InProcessCatalog};
pub use command::{CommandTable, Outcome, UiAction};
pub use config::PokedexConfig;
pub use error::{CatalogError, CommandError, ConfigError, PokedexError, Result, StorageError};
pub use session::{PageOutcome, PokedexSession, Toggled};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

pub use pokedex_types as types;
