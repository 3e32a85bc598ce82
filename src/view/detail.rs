//! Detail panel
//!
//! `Idle → Loading → Loaded | Failed`, one transition per `show`. The loaded
//! view is built by a pure function of the detail and the caught state.

use pokedex_types::{EntityDetail, EntityId};
use serde::Serialize;

use crate::catalog::ImageUrls;
use crate::command::UiAction;

pub const DETAIL_UNAVAILABLE: &str =
    "Unable to load Pokémon details right now. Please try again.";

const MARK_LABEL: &str = "Mark as caught";
const RELEASE_LABEL: &str = "Release";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleButton {
    pub label: String,
    pub style: ButtonStyle,
    pub action: UiAction,
}

impl ToggleButton {
    pub fn for_state(id: &EntityId, caught: bool) -> Self {
        let mut button = Self {
            label: String::new(),
            style: ButtonStyle::Primary,
            action: UiAction::toggle_caught(id),
        };
        button.relabel(caught);
        button
    }

    /// Caught: "Release", secondary. Otherwise: "Mark as caught", primary.
    pub fn relabel(&mut self, caught: bool) {
        if caught {
            self.label = RELEASE_LABEL.to_string();
            self.style = ButtonStyle::Secondary;
        } else {
            self.label = MARK_LABEL.to_string();
            self.style = ButtonStyle::Primary;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: EntityId,
    pub name: String,
    pub number_label: String,
    pub artwork_url: String,
    pub artwork_alt: String,
    pub height: f64,
    pub weight: f64,
    /// Display-capitalized type names, in response order
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub toggle: ToggleButton,
}

impl DetailView {
    pub fn build(detail: &EntityDetail, caught: bool, images: &ImageUrls) -> Self {
        Self {
            id: detail.id.clone(),
            name: detail.name.clone(),
            number_label: detail.id.number_label(),
            artwork_url: images.artwork(&detail.id),
            artwork_alt: format!("{} official artwork", detail.name),
            height: detail.height,
            weight: detail.weight,
            types: detail.types.iter().map(|t| capitalize(t)).collect(),
            abilities: detail.abilities.iter().map(|a| capitalize(a)).collect(),
            toggle: ToggleButton::for_state(&detail.id, caught),
        }
    }

    pub fn meta_line(&self) -> String {
        format!("Height: {} • Weight: {}", self.height, self.weight)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailPanel {
    #[default]
    Idle,
    Loading {
        id: EntityId,
    },
    Loaded(Box<DetailView>),
    Failed {
        id: EntityId,
        message: String,
    },
}

impl DetailPanel {
    /// Enter `Loading`, dropping whatever was shown before
    pub fn begin(&mut self, id: &EntityId) {
        *self = DetailPanel::Loading { id: id.clone() };
    }

    /// Settle a load. A result for an id other than the one loading is stale
    /// and ignored; returns whether it was applied.
    pub fn finish(&mut self, id: &EntityId, result: Result<DetailView, String>) -> bool {
        match self {
            DetailPanel::Loading { id: loading } if *loading == *id => {}
            _ => {
                tracing::debug!(id = %id, "Discarding stale detail response");
                return false;
            }
        }
        *self = match result {
            Ok(view) => DetailPanel::Loaded(Box::new(view)),
            Err(_) => DetailPanel::Failed {
                id: id.clone(),
                message: DETAIL_UNAVAILABLE.to_string(),
            },
        };
        true
    }

    /// Relabel the toggle button if the panel is showing `id`
    pub fn sync_toggle(&mut self, id: &EntityId, caught: bool) -> bool {
        match self {
            DetailPanel::Loaded(view) if view.id == *id => {
                view.toggle.relabel(caught);
                true
            }
            _ => false,
        }
    }

    pub fn view(&self) -> Option<&DetailView> {
        match self {
            DetailPanel::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn toggle_action(&self) -> Option<&UiAction> {
        self.view().map(|view| &view.toggle.action)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailPanel::Loading { .. })
    }
}

/// Upper-case the first letter of each whitespace-separated word
fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulbasaur() -> EntityDetail {
        EntityDetail {
            id: EntityId::new("1"),
            name: "bulbasaur".into(),
            types: vec!["grass".into(), "poison".into()],
            abilities: vec!["overgrow".into(), "chlorophyll".into()],
            height: 7.0,
            weight: 69.0,
        }
    }

    fn images() -> ImageUrls {
        ImageUrls::new("https://thumbs", "https://art")
    }

    #[test]
    fn test_build_view_for_uncaught() {
        let view = DetailView::build(&bulbasaur(), false, &images());
        assert_eq!(view.number_label, "#1");
        assert_eq!(view.artwork_url, "https://art/1.png");
        assert_eq!(view.artwork_alt, "bulbasaur official artwork");
        assert_eq!(view.types, vec!["Grass", "Poison"]);
        assert_eq!(view.abilities, vec!["Overgrow", "Chlorophyll"]);
        assert_eq!(view.meta_line(), "Height: 7 • Weight: 69");
        assert_eq!(view.toggle.label, "Mark as caught");
        assert_eq!(view.toggle.style, ButtonStyle::Primary);
        assert_eq!(view.toggle.action, UiAction::toggle_caught(&EntityId::new("1")));
    }

    #[test]
    fn test_build_view_for_caught() {
        let view = DetailView::build(&bulbasaur(), true, &images());
        assert_eq!(view.toggle.label, "Release");
        assert_eq!(view.toggle.style, ButtonStyle::Secondary);
    }

    #[test]
    fn test_failure_replaces_previous_content() {
        let id = EntityId::new("1");
        let mut panel = DetailPanel::default();
        panel.begin(&id);
        panel.finish(&id, Ok(DetailView::build(&bulbasaur(), false, &images())));
        assert!(panel.view().is_some());

        let other = EntityId::new("2");
        panel.begin(&other);
        assert!(panel.view().is_none());
        panel.finish(&other, Err("HTTP 500".into()));
        assert_eq!(
            panel,
            DetailPanel::Failed {
                id: other,
                message: DETAIL_UNAVAILABLE.into()
            }
        );
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut panel = DetailPanel::default();
        panel.begin(&EntityId::new("2"));
        let applied = panel.finish(
            &EntityId::new("1"),
            Ok(DetailView::build(&bulbasaur(), false, &images())),
        );
        assert!(!applied);
        assert!(panel.is_loading());
    }

    #[test]
    fn test_sync_toggle_only_for_shown_id() {
        let id = EntityId::new("1");
        let mut panel = DetailPanel::default();
        panel.begin(&id);
        panel.finish(&id, Ok(DetailView::build(&bulbasaur(), false, &images())));

        assert!(!panel.sync_toggle(&EntityId::new("5"), true));
        assert_eq!(panel.view().unwrap().toggle.label, "Mark as caught");
        assert!(panel.sync_toggle(&id, true));
        assert_eq!(panel.view().unwrap().toggle.label, "Release");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize("solar-power"), "Solar-power");
        assert_eq!(capitalize("two words"), "Two Words");
        assert_eq!(capitalize(""), "");
    }
}
