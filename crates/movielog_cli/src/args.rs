//! Command-line argument definitions.
//!
//! # Responsibility
//! - Declare the clap surface: global options plus one subcommand per
//!   repository operation.
//! - Load `.env` configuration before parsing so env-backed defaults
//!   (database path, log directory) resolve.

use clap::{Parser, Subcommand};
use std::env;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage a local movie catalog from the command line",
    long_about = "movielog keeps a catalog of watched and to-watch movies in a local \
SQLite database. Run a subcommand directly, or run with no subcommand to get an \
interactive menu.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "db",
        env = "MOVIELOG_DB",
        default_value = "movielog.db",
        value_name = "PATH",
        help = "SQLite database file holding the catalog"
    )]
    pub db_path: String,

    #[arg(
        long = "log-dir",
        env = "MOVIELOG_LOG_DIR",
        default_value = "logs",
        value_name = "DIR",
        help = "Directory for rolling log files (made absolute against the working directory)"
    )]
    pub log_dir: String,

    #[arg(
        long = "log-level",
        env = "MOVIELOG_LOG_LEVEL",
        value_name = "LEVEL",
        help = "Log level: trace|debug|info|warn|error (defaults per build mode)"
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "List all movies in the catalog")]
    List,
    #[command(about = "Add a new movie (prompts for each field)")]
    Add,
    #[command(about = "Find one movie by its id")]
    Find {
        #[arg(value_name = "ID", help = "Movie id; prompted for when omitted")]
        id: Option<String>,
    },
    #[command(
        about = "Update a movie",
        long_about = "Update a movie. Each prompt shows the current value; press Enter to \
keep it, or enter `-` to clear an optional field."
    )]
    Update {
        #[arg(value_name = "ID", help = "Movie id; prompted for when omitted")]
        id: Option<String>,
    },
    #[command(about = "Delete a movie (asks for confirmation)")]
    Delete {
        #[arg(value_name = "ID", help = "Movie id; prompted for when omitted")]
        id: Option<String>,
    },
}

/// Loads `.env` (path overridable via `DOTENV_PATH`) and parses the CLI.
pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
