//! Terminal rendering of the view models

use std::fmt::Write;

use colored::Colorize;

use super::{ButtonStyle, DetailPanel, GridView, SelectionListView};

pub fn render_grid(grid: &GridView, exhausted: bool) -> String {
    let mut out = String::new();
    if grid.is_empty() {
        let _ = writeln!(out, "{}", "No Pokémon loaded yet.".dimmed());
    }
    for card in grid.cards() {
        let number = format!("{:>6}", card.number_label).dimmed();
        let line = match &card.badge {
            Some(badge) => format!(
                "{} {} {}",
                number,
                card.name.green().bold(),
                format!("[{}]", badge).green()
            ),
            None => format!("{} {}", number, card.name),
        };
        let _ = writeln!(out, "{}", line);
    }
    if exhausted {
        let _ = writeln!(out, "{}", "-- end of catalog --".dimmed());
    } else {
        let _ = writeln!(out, "{}", "-- 'more' loads the next page --".dimmed());
    }
    out
}

pub fn render_caught_list(list: &SelectionListView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})",
        "Caught".bold(),
        list.count().to_string().cyan()
    );
    if list.items().is_empty() {
        let _ = writeln!(out, "  {}", "Nothing caught yet.".dimmed());
    }
    for item in list.items() {
        let _ = writeln!(out, "  • {}", item.label);
    }
    out
}

pub fn render_detail(panel: &DetailPanel) -> String {
    let mut out = String::new();
    match panel {
        DetailPanel::Idle => {
            let _ = writeln!(out, "{}", "Select a Pokémon to see its details.".dimmed());
        }
        DetailPanel::Loading { id } => {
            let _ = writeln!(out, "{}", format!("Loading #{}...", id).dimmed());
        }
        DetailPanel::Failed { message, .. } => {
            let _ = writeln!(out, "{}", message.yellow());
        }
        DetailPanel::Loaded(view) => {
            let _ = writeln!(
                out,
                "{} {}",
                view.name.bold(),
                view.number_label.dimmed()
            );
            let _ = writeln!(out, "{}", view.meta_line());
            let _ = writeln!(out, "Artwork: {}", view.artwork_url.underline());
            let _ = writeln!(out, "Types: {}", chips(&view.types));
            let _ = writeln!(out, "Abilities: {}", chips(&view.abilities));
            let button = format!("[ {} ]", view.toggle.label);
            let button = match view.toggle.style {
                ButtonStyle::Primary => button.black().on_green(),
                ButtonStyle::Secondary => button.white().on_bright_black(),
            };
            let _ = writeln!(out, "{}  {}", button, "('toggle' to press)".dimmed());
        }
    }
    out
}

fn chips(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("({})", v))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DETAIL_UNAVAILABLE;
    use pokedex_types::EntityId;

    #[test]
    fn test_failed_panel_shows_placeholder() {
        colored::control::set_override(false);
        let panel = DetailPanel::Failed {
            id: EntityId::new("1"),
            message: DETAIL_UNAVAILABLE.into(),
        };
        assert_eq!(render_detail(&panel).trim_end(), DETAIL_UNAVAILABLE);
    }

    #[test]
    fn test_empty_caught_list() {
        colored::control::set_override(false);
        let text = render_caught_list(&SelectionListView::new());
        assert!(text.starts_with("Caught (0)"));
    }
}
