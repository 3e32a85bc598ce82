//! Action dispatch
//!
//! Every interactive element in a view carries a [`UiAction`]: an action
//! identifier plus an optional target id. [`CommandTable`] resolves the
//! identifier to a [`Command`] and runs it against the session.

use std::collections::HashMap;

use pokedex_types::EntityId;
use serde::Serialize;

use crate::error::CommandError;
use crate::session::{PageOutcome, PokedexSession, Toggled};

pub const LOAD_MORE: &str = "load-more";
pub const SHOW_DETAIL: &str = "show-detail";
pub const TOGGLE_CAUGHT: &str = "toggle-caught";
pub const SHOW_CAUGHT: &str = "show-caught";
pub const SHOW_GRID: &str = "show-grid";

/// Action attached to a rendered element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiAction {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EntityId>,
}

impl UiAction {
    pub fn new(action: &str, target: Option<EntityId>) -> Self {
        Self {
            action: action.to_string(),
            target,
        }
    }

    pub fn load_more() -> Self {
        Self::new(LOAD_MORE, None)
    }

    pub fn show_detail(id: &EntityId) -> Self {
        Self::new(SHOW_DETAIL, Some(id.clone()))
    }

    pub fn toggle_caught(id: &EntityId) -> Self {
        Self::new(TOGGLE_CAUGHT, Some(id.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LoadMore,
    ShowDetail,
    ToggleCaught,
    ShowCaught,
    ShowGrid,
}

impl Command {
    fn needs_target(self) -> bool {
        matches!(self, Command::ShowDetail | Command::ToggleCaught)
    }
}

/// What a dispatched action did, so the front-end knows what to redraw
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Page(PageOutcome),
    Detail(EntityId),
    Toggled(Toggled),
    CaughtList,
    Grid,
}

pub struct CommandTable {
    commands: HashMap<&'static str, Command>,
}

impl Default for CommandTable {
    fn default() -> Self {
        let commands = [
            (LOAD_MORE, Command::LoadMore),
            (SHOW_DETAIL, Command::ShowDetail),
            (TOGGLE_CAUGHT, Command::ToggleCaught),
            (SHOW_CAUGHT, Command::ShowCaught),
            (SHOW_GRID, Command::ShowGrid),
        ]
        .into_iter()
        .collect();
        Self { commands }
    }
}

impl CommandTable {
    pub fn resolve(&self, action: &UiAction) -> Result<Command, CommandError> {
        let command = *self
            .commands
            .get(action.action.as_str())
            .ok_or_else(|| CommandError::UnknownAction(action.action.clone()))?;

        let missing = action.target.as_ref().map_or(true, EntityId::is_empty);
        if command.needs_target() && missing {
            return Err(CommandError::MissingTarget {
                action: action.action.clone(),
            });
        }
        Ok(command)
    }

    pub async fn dispatch(
        &self,
        session: &mut PokedexSession,
        action: &UiAction,
    ) -> Result<Outcome, CommandError> {
        let command = self.resolve(action)?;
        tracing::debug!(action = %action.action, target = ?action.target, "Dispatching action");

        let outcome = match (command, action.target.as_ref()) {
            (Command::LoadMore, _) => Outcome::Page(session.load_more().await),
            (Command::ShowDetail, Some(id)) => {
                session.show_detail(id).await;
                Outcome::Detail(id.clone())
            }
            (Command::ToggleCaught, Some(id)) => Outcome::Toggled(session.toggle(id)),
            (Command::ShowCaught, _) => Outcome::CaughtList,
            (Command::ShowGrid, _) => Outcome::Grid,
            (_, None) => {
                return Err(CommandError::MissingTarget {
                    action: action.action.clone(),
                })
            }
        };
        Ok(outcome)
    }
}

/// A line typed at the interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Action(UiAction),
    Help,
    Quit,
    Empty,
}

/// Translate prompt text into an action.
///
/// A bare `toggle` (or `t`) presses the detail panel's button, so it needs the
/// panel's current toggle action.
pub fn parse_prompt(
    line: &str,
    panel_toggle: Option<&UiAction>,
) -> Result<PromptInput, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(PromptInput::Empty);
    };
    let target = words.next().map(EntityId::new);

    let input = match verb.to_ascii_lowercase().as_str() {
        "more" | "m" | "next" => PromptInput::Action(UiAction::load_more()),
        "show" | "s" => match target {
            Some(id) => PromptInput::Action(UiAction::show_detail(&id)),
            None => {
                return Err(CommandError::MissingTarget {
                    action: SHOW_DETAIL.to_string(),
                })
            }
        },
        "toggle" | "t" | "catch" | "release" => match (target, panel_toggle) {
            (Some(id), _) => PromptInput::Action(UiAction::toggle_caught(&id)),
            (None, Some(button)) => PromptInput::Action(button.clone()),
            (None, None) => {
                return Err(CommandError::MissingTarget {
                    action: TOGGLE_CAUGHT.to_string(),
                })
            }
        },
        "caught" | "c" => PromptInput::Action(UiAction::new(SHOW_CAUGHT, None)),
        "grid" | "g" | "list" => PromptInput::Action(UiAction::new(SHOW_GRID, None)),
        "help" | "h" | "?" => PromptInput::Help,
        "quit" | "q" | "exit" => PromptInput::Quit,
        other => return Err(CommandError::UnknownAction(other.to_string())),
    };
    Ok(input)
}
