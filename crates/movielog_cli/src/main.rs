//! movielog CLI entry point.
//!
//! # Responsibility
//! - Parse arguments and environment configuration.
//! - Initialize logging, open the database, wire the repository/service.
//! - Dispatch to a direct subcommand or the interactive menu.

mod args;
mod commands;
mod input;
mod render;

use anyhow::{Context, Result};
use movielog_core::db::open_db;
use movielog_core::{default_log_level, init_logging, MovieService, SqliteMovieRepository};
use std::path::Path;

fn main() -> Result<()> {
    let cli = args::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    // Logging is best-effort: a broken log directory must not keep the
    // catalog unusable.
    match absolute_log_dir(&cli.log_dir) {
        Ok(log_dir) => {
            if let Err(err) = init_logging(&level, &log_dir) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("warning: logging disabled: {err}"),
    }

    let conn = open_db(&cli.db_path)
        .with_context(|| format!("failed to open movie database `{}`", cli.db_path))?;
    let repo = SqliteMovieRepository::try_new(&conn)?;
    let service = MovieService::new(repo);

    match cli.cmd {
        Some(cmd) => commands::run(&service, cmd),
        None => commands::interactive_menu(&service),
    }
}

fn absolute_log_dir(log_dir: &str) -> Result<String> {
    let path = Path::new(log_dir);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot resolve working directory for log files")?
            .join(path)
    };
    absolute
        .to_str()
        .map(str::to_string)
        .context("log directory path is not valid UTF-8")
}
