//! View models
//!
//! Declarative state for each panel of the browser. Nothing here performs I/O;
//! [`text`] turns the models into terminal output and every model serializes
//! to JSON for `--format json`.

pub mod detail;
pub mod grid;
pub mod selection_list;
pub mod text;

pub use detail::{ButtonStyle, DetailPanel, DetailView, ToggleButton, DETAIL_UNAVAILABLE};
pub use grid::{CardView, GridView, CAUGHT_BADGE};
pub use selection_list::{SelectionListItem, SelectionListView};
