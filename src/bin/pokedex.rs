//! Pokedex Command Line Interface
//!
//! Browse the catalog page by page, inspect entries and keep a caught list.
//!
//! # Usage
//!
//! ```bash
//! # Interactive browser (default)
//! pokedex
//!
//! # First two pages as JSON
//! pokedex --format json page --pages 2
//!
//! # Detail view, then mark it caught
//! pokedex show 25
//! pokedex toggle 25
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::command::{parse_prompt, PromptInput};
use pokedex::types::EntityId;
use pokedex::view::text::{render_caught_list, render_detail, render_grid};
use pokedex::{CommandTable, Outcome, PageOutcome, PokedexConfig, PokedexSession, Toggled};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(version)]
#[command(about = "Browse the Pokémon catalog and keep a caught list")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// YAML config file
    #[arg(long, short = 'c', global = true, env = "POKEDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Storage file holding the caught list (overrides config)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Output format for one-shot commands
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive browser
    Browse,

    /// Load catalog pages and print the grid
    Page {
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Show one entry's detail
    Show { id: String },

    /// Mark or release an entry
    Toggle { id: String },

    /// Print the caught list
    Caught,
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config =
        PokedexConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(storage) = cli.storage {
        config.storage_path = storage;
    }

    let mut session = PokedexSession::open(&config).context("Failed to open session")?;
    let format = cli.format;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => browse(&mut session).await,
        Commands::Page { pages } => {
            for _ in 0..pages {
                match session.load_more().await {
                    PageOutcome::Loaded { .. } => {}
                    PageOutcome::Exhausted => break,
                    PageOutcome::Failed => anyhow::bail!("Failed to load Pokémon list"),
                }
            }
            emit(format, session.grid(), || {
                render_grid(session.grid(), session.is_exhausted())
            })
        }
        Commands::Show { id } => {
            session.show_detail(&EntityId::new(id)).await;
            emit(format, session.detail(), || render_detail(session.detail()))
        }
        Commands::Toggle { id } => {
            let toggled = session.toggle(&EntityId::new(id));
            report_toggle(&toggled);
            emit(format, session.caught_list(), || {
                render_caught_list(session.caught_list())
            })
        }
        Commands::Caught => emit(format, session.caught_list(), || {
            render_caught_list(session.caught_list())
        }),
    }
}

fn emit<T: Serialize>(format: OutputFormat, model: &T, pretty: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(model).context("Failed to serialize view")?;
            println!("{}", json);
        }
        OutputFormat::Pretty => print!("{}", pretty()),
    }
    Ok(())
}

fn report_toggle(toggled: &Toggled) {
    let verb = if toggled.selected { "Caught" } else { "Released" };
    println!("{} #{}", verb.bold(), toggled.id);
    if let Some(err) = &toggled.persist_error {
        println!("{} {}", "warning:".yellow().bold(), err);
    }
}

// =============================================================================
// INTERACTIVE
// =============================================================================

const HELP: &str = "\
  more            load the next page
  show <id>       open an entry's detail
  toggle [<id>]   press the detail button (or toggle <id>)
  caught          show the caught list
  grid            show every loaded card
  quit            leave";

async fn browse(session: &mut PokedexSession) -> Result<()> {
    let table = CommandTable::default();
    let mut editor = DefaultEditor::new().context("Failed to start line editor")?;

    println!("{}", "Pokedex - type 'help' for commands".bold());
    print!("{}", render_caught_list(session.caught_list()));
    let first_page = session.load_more().await;
    redraw(session, Outcome::Page(first_page));

    loop {
        let line = match editor.readline("pokedex> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        let _ = editor.add_history_entry(line.as_str());

        let action = match parse_prompt(&line, session.detail().toggle_action()) {
            Ok(PromptInput::Action(action)) => action,
            Ok(PromptInput::Help) => {
                println!("{}", HELP);
                continue;
            }
            Ok(PromptInput::Quit) => break,
            Ok(PromptInput::Empty) => continue,
            Err(e) => {
                println!("{} {}", "?".yellow(), e);
                continue;
            }
        };

        match table.dispatch(session, &action).await {
            Ok(outcome) => redraw(session, outcome),
            Err(e) => println!("{} {}", "?".yellow(), e),
        }
    }
    Ok(())
}

fn redraw(session: &PokedexSession, outcome: Outcome) {
    match outcome {
        Outcome::Page(PageOutcome::Failed) => {
            println!("{}", "Could not load the next page.".yellow())
        }
        Outcome::Page(PageOutcome::Exhausted) => {
            println!("{}", "No more Pokémon to load.".dimmed())
        }
        Outcome::Page(PageOutcome::Loaded { .. }) | Outcome::Grid => {
            print!("{}", render_grid(session.grid(), session.is_exhausted()))
        }
        Outcome::Detail(_) => print!("{}", render_detail(session.detail())),
        Outcome::Toggled(toggled) => {
            report_toggle(&toggled);
            print!("{}", render_detail(session.detail()));
            print!("{}", render_caught_list(session.caught_list()));
        }
        Outcome::CaughtList => print!("{}", render_caught_list(session.caught_list())),
    }
}
