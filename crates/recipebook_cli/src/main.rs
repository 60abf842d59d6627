//! Recipe catalog command-line entry point.
//!
//! # Responsibility
//! - Map subcommands onto `RecipeService` calls through the shared binding.
//! - Validate draft payloads before they reach storage.
//! - Translate absent results into a not-found exit status.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;
use recipebook_core::{
    configure_shared_binding, default_log_level, init_logging, BackendKind, Recipe, RecipeDraft,
    RecipeId,
};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_NOT_FOUND: u8 = 4;
const NOT_FOUND_MESSAGE: &str = "Recipe not found";

#[derive(Parser)]
#[command(name = "recipebook", version, about = "Recipe catalog CRUD and search")]
struct Cli {
    /// Storage backend: memory, sqlite or sqlite-memory
    #[arg(long, env = "RECIPEBOOK_BACKEND", default_value = "sqlite")]
    backend: String,

    /// SQLite database file used by the sqlite backend
    #[arg(long, env = "RECIPEBOOK_DB_PATH", default_value = "recipes.db")]
    db_path: String,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, env = "RECIPEBOOK_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "RECIPEBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Health check
    Ping,
    /// List every recipe
    List,
    /// Show one recipe
    Get { id: RecipeId },
    /// Create a recipe from a JSON draft
    Create(DraftInput),
    /// Replace every field of a recipe with a JSON draft
    Update {
        id: RecipeId,
        #[command(flatten)]
        input: DraftInput,
    },
    /// Delete a recipe
    Delete { id: RecipeId },
    /// Case-insensitive title search (no query returns nothing)
    Search { query: Option<String> },
}

#[derive(Args)]
struct DraftInput {
    /// Draft as inline JSON
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    json: Option<String>,

    /// Path to a JSON file holding the draft
    #[arg(long)]
    file: Option<PathBuf>,
}

impl DraftInput {
    fn read(&self) -> Result<RecipeDraft> {
        let raw = match (&self.json, &self.file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("cannot read draft file `{}`", path.display()))?,
            (None, None) => anyhow::bail!("a draft is required (--json or --file)"),
        };
        parse_draft(&raw)
    }
}

/// Result shapes the transport maps onto output and exit status.
#[derive(Debug)]
enum Outcome {
    Text(String),
    One(Recipe),
    Many(Vec<Recipe>),
    NoContent,
    NotFound,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(outcome) => render(outcome),
        Err(err) => {
            warn!("event=cli_command module=cli status=error error={err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    if let Command::Ping = cli.command {
        return Ok(Outcome::Text(recipebook_core::ping().to_string()));
    }

    let backend = BackendKind::parse(Some(&cli.backend), Some(&cli.db_path))?;
    let service = configure_shared_binding(backend)?
        .service()
        .context("cannot open recipe storage")?;

    let outcome = match &cli.command {
        Command::Ping => Outcome::Text(recipebook_core::ping().to_string()),
        Command::List => Outcome::Many(service.list_recipes()?),
        Command::Get { id } => service
            .get_recipe(*id)?
            .map_or(Outcome::NotFound, Outcome::One),
        Command::Create(input) => Outcome::One(service.create_recipe(&input.read()?)?),
        Command::Update { id, input } => service
            .update_recipe(*id, &input.read()?)?
            .map_or(Outcome::NotFound, Outcome::One),
        Command::Delete { id } => {
            if service.delete_recipe(*id)? {
                Outcome::NoContent
            } else {
                Outcome::NotFound
            }
        }
        Command::Search { query } => Outcome::Many(service.search_recipes(query.as_deref())?),
    };
    Ok(outcome)
}

fn render(outcome: Outcome) -> ExitCode {
    let printed = match outcome {
        Outcome::Text(text) => {
            println!("{text}");
            Ok(())
        }
        Outcome::One(recipe) => print_json(&recipe),
        Outcome::Many(recipes) => print_json(&recipes),
        Outcome::NoContent => Ok(()),
        Outcome::NotFound => {
            eprintln!("{NOT_FOUND_MESSAGE}");
            return ExitCode::from(EXIT_NOT_FOUND);
        }
    };

    match printed {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("cannot encode response")?;
    println!("{text}");
    Ok(())
}

/// Decodes and validates a draft payload.
///
/// Missing fields or wrong shapes fail JSON decoding; a blank title fails
/// validation. Storage never sees either.
fn parse_draft(raw: &str) -> Result<RecipeDraft> {
    let draft: RecipeDraft = serde_json::from_str(raw).context("invalid recipe payload")?;
    draft.validate().context("invalid recipe payload")?;
    Ok(draft)
}
