//! Subcommand handlers and the interactive menu.
//!
//! # Responsibility
//! - Map every CLI action 1:1 onto a service/repository call.
//! - Render results and repository failures to the terminal; the
//!   repository contract itself lives in `movielog_core`.
//!
//! # Invariants
//! - One repository operation per user action, issued sequentially from
//!   this single thread.
//! - Handlers never retry; failures surface immediately.

use crate::args::Command;
use crate::input;
use crate::render;
use anyhow::{anyhow, bail, Result};
use log::{info, warn};
use movielog_core::{Movie, MoviePatch, MovieRepository, MovieService, RepoError};

/// Dispatches one direct subcommand.
pub fn run<R: MovieRepository>(service: &MovieService<R>, cmd: Command) -> Result<()> {
    match cmd {
        Command::List => list(service),
        Command::Add => add(service),
        Command::Find { id } => find(service, id),
        Command::Update { id } => update(service, id),
        Command::Delete { id } => delete(service, id),
    }
}

/// Runs the menu loop until the user quits.
pub fn interactive_menu<R: MovieRepository>(service: &MovieService<R>) -> Result<()> {
    loop {
        println!();
        println!("What would you like to do?");
        println!("  1) List all movies");
        println!("  2) Add a new movie");
        println!("  3) Find a movie by id");
        println!("  4) Update a movie");
        println!("  5) Delete a movie");
        println!("  6) Quit");

        let choice = input::prompt_required("choice", "Choice [1-6]:")?;
        let result = match choice.as_str() {
            "1" => list(service),
            "2" => add(service),
            "3" => find(service, None),
            "4" => update(service, None),
            "5" => delete(service, None),
            "6" => break,
            other => {
                println!("unknown choice `{other}`");
                Ok(())
            }
        };

        // In the menu, failures are rendered and the session continues;
        // only direct subcommands turn them into a non-zero exit.
        if let Err(err) = result {
            warn!("event=menu_action module=cli status=error error={err}");
            eprintln!("error: {err}");
        }

        if !input::prompt_confirm("Another operation?", true)? {
            break;
        }
    }

    println!("Bye!");
    Ok(())
}

fn list<R: MovieRepository>(service: &MovieService<R>) -> Result<()> {
    let movies = service.list_movies()?;
    info!(
        "event=cli_list module=cli status=ok count={}",
        movies.len()
    );

    if movies.is_empty() {
        println!("No movies in the catalog yet.");
        return Ok(());
    }

    print!("{}", render::movie_table(&movies));
    Ok(())
}

fn add<R: MovieRepository>(service: &MovieService<R>) -> Result<()> {
    println!("Adding a new movie:");
    let title = input::prompt_required("title", "Title:")?;
    let director = input::prompt_required("director", "Director:")?;
    let release_year = input::prompt_release_year("Release year:")?;

    // The id is generated here, on the caller side; the repository
    // never mints identifiers.
    let mut movie = Movie::new(title, director, release_year);
    movie.genre = input::prompt_optional_text("Genre (optional):")?;
    movie.rating = input::prompt_optional_rating("Rating 0-10 (optional):")?;
    movie.watched_date = input::prompt_optional_date("Watched date DD/MM/YYYY (optional):")?;

    match service.create_movie(&movie) {
        Ok(()) => {
            info!("event=cli_add module=cli status=ok id={}", movie.id);
            println!("Added `{}` with id {}", movie.title, movie.id);
            Ok(())
        }
        Err(RepoError::DuplicateId(id)) => bail!("a movie with id {id} already exists"),
        Err(err) => Err(err.into()),
    }
}

fn find<R: MovieRepository>(service: &MovieService<R>, id: Option<String>) -> Result<()> {
    let id = resolve_id(id)?;

    match service.get_movie(&id)? {
        Some(movie) => {
            info!("event=cli_find module=cli status=ok id={id}");
            print!("{}", render::movie_table(&[movie]));
            Ok(())
        }
        None => {
            info!("event=cli_find module=cli status=not_found id={id}");
            bail!("movie not found: {id}")
        }
    }
}

fn update<R: MovieRepository>(service: &MovieService<R>, id: Option<String>) -> Result<()> {
    let id = resolve_id(id)?;

    let current = service
        .get_movie(&id)?
        .ok_or_else(|| anyhow!("movie not found: {id}"))?;

    println!("Updating `{}` (Enter keeps the current value, `-` clears an optional field):", current.title);
    let patch = MoviePatch {
        title: input::prompt_patch_text(&format!("Title [{}]:", current.title))?,
        director: input::prompt_patch_text(&format!("Director [{}]:", current.director))?,
        release_year: input::prompt_patch_year(&format!(
            "Release year [{}]:",
            current.release_year
        ))?,
        genre: input::prompt_patch_optional_text(&format!(
            "Genre [{}]:",
            current.genre.as_deref().unwrap_or("-")
        ))?,
        rating: input::prompt_patch_rating(&format!(
            "Rating [{}]:",
            current
                .rating
                .map(|rating| format!("{rating:.1}"))
                .unwrap_or_else(|| "-".to_string())
        ))?,
        watched_date: input::prompt_patch_date(&format!(
            "Watched date [{}]:",
            current.watched_date.as_deref().unwrap_or("-")
        ))?,
    };

    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    match service.update_movie(&id, &patch) {
        Ok(updated) => {
            info!("event=cli_update module=cli status=ok id={id}");
            println!("Updated:");
            print!("{}", render::movie_table(&[updated]));
            Ok(())
        }
        Err(RepoError::NotFound(id)) => bail!("movie not found: {id}"),
        Err(err) => Err(err.into()),
    }
}

fn delete<R: MovieRepository>(service: &MovieService<R>, id: Option<String>) -> Result<()> {
    let id = resolve_id(id)?;

    let movie = service
        .get_movie(&id)?
        .ok_or_else(|| anyhow!("movie not found: {id}"))?;

    if !input::prompt_confirm(&format!("Really delete `{}`?", movie.title), false)? {
        println!("Cancelled.");
        return Ok(());
    }

    match service.delete_movie(&id) {
        Ok(()) => {
            info!("event=cli_delete module=cli status=ok id={id}");
            println!("Deleted `{}`.", movie.title);
            Ok(())
        }
        Err(RepoError::NotFound(id)) => bail!("movie not found: {id}"),
        Err(err) => Err(err.into()),
    }
}

fn resolve_id(id: Option<String>) -> Result<String> {
    match id {
        Some(id) => Ok(id),
        None => Ok(input::prompt_required("id", "Movie id:")?),
    }
}
