//! Shared Catalog Types for pokedex
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing the
//! catalog boundary (remote JSON API) and the storage boundary (persisted ids).
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  Catalog API     │  JSON   │  pokedex session │
//! │  (pokeapi.co)    │ ──────► │  (views, store)  │
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. Wire types mirror the remote JSON exactly; domain types are derived from them
//! 2. Ids are normalized once, at construction, and compared as strings after that

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// ENTITY ID
// ============================================================================

/// Opaque catalog id, canonically the last path segment of a resource URL.
///
/// Construction trims surrounding whitespace and nothing else, so `"007"`
/// and `"7"` are different ids and display exactly as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// Coerce a JSON scalar into an id. Strings and numbers are accepted,
    /// anything else yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::new(s)),
            serde_json::Value::Number(n) => Some(Self::new(number_text(n))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn numeric_value(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// `#<id>` as shown on cards, list placeholders and the detail header
    pub fn number_label(&self) -> String {
        format!("#{}", self.0)
    }

    /// Display order: numeric ids ascending by value, then non-numeric ids
    /// lexically. Equal values (`"7"` vs `"007"`) fall back to the raw text.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_value(), other.numeric_value()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

/// Whole-valued floats (`1.0`, `1e3`) print as integers, like JS `String(x)`
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

// ============================================================================
// WIRE TYPES (remote catalog JSON)
// ============================================================================

/// `GET {list}?offset=O&limit=L`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPageResponse {
    /// Fully-qualified URL of the following page, requested verbatim
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<NamedResource>,
}

/// `{ name, url }` entry of a list page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// `GET {detail}/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub types: Vec<TypeSlot>,
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_ref: NamedRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

// ============================================================================
// DOMAIN TYPES
// ============================================================================

/// Minimal registry entry, created from a list page or a detail response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: EntityId,
    pub name: String,
}

impl EntitySummary {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Full detail of one entity, flattened from [`DetailResponse`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDetail {
    pub id: EntityId,
    pub name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub height: f64,
    pub weight: f64,
}

impl EntityDetail {
    pub fn from_response(id: EntityId, response: DetailResponse) -> Self {
        Self {
            id,
            name: response.name,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.type_ref.name)
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            height: response.height,
            weight: response.weight,
        }
    }
}
