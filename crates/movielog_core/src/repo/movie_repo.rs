//! Movie repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `movies` relation.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call model validation before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Candidate ids are matched as raw text; UUID shape is never checked
//!   at this layer, so a malformed id simply matches nothing.
//! - Every mutation is a single SQL statement, so one record is never
//!   observable in a partially written state.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::movie::{FieldUpdate, Movie, MoviePatch, MovieValidationError};
use rusqlite::types::Value;
use rusqlite::{ffi, params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const MOVIE_SELECT_SQL: &str = "SELECT
    id,
    title,
    director,
    release_year,
    genre,
    rating,
    watched_date
FROM movies";

const MOVIE_COLUMNS: [&str; 7] = [
    "id",
    "title",
    "director",
    "release_year",
    "genre",
    "rating",
    "watched_date",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for movie persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MovieValidationError),
    Db(DbError),
    NotFound(String),
    DuplicateId(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "movie not found: {id}"),
            Self::DuplicateId(id) => write!(f, "movie id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted movie data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MovieValidationError> for RepoError {
    fn from(value: MovieValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for movie CRUD operations.
pub trait MovieRepository {
    /// Lists all records in store insertion order. Possibly empty.
    fn list_movies(&self) -> RepoResult<Vec<Movie>>;
    /// Gets one record by candidate id. Absent ids return `Ok(None)`.
    fn get_movie(&self, id: &str) -> RepoResult<Option<Movie>>;
    /// Inserts one record. An existing id fails with `DuplicateId`.
    fn create_movie(&self, movie: &Movie) -> RepoResult<()>;
    /// Merges the patch into one record and returns the post-update row.
    fn update_movie(&self, id: &str, patch: &MoviePatch) -> RepoResult<Movie>;
    /// Permanently removes one record.
    fn delete_movie(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed movie repository.
///
/// Stateless between calls; the borrowed connection is the only handle
/// to the store and every operation issues exactly one statement against
/// it (plus a read-back for `update_movie`).
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   schema does not match this binary.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn list_movies(&self) -> RepoResult<Vec<Movie>> {
        // rowid order is SQLite insertion order; no explicit sort is imposed.
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} ORDER BY rowid;"))?;
        let mut rows = stmt.query([])?;
        let mut movies = Vec::new();

        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }

        Ok(movies)
    }

    fn get_movie(&self, id: &str) -> RepoResult<Option<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_movie_row(row)?));
        }

        Ok(None)
    }

    fn create_movie(&self, movie: &Movie) -> RepoResult<()> {
        movie.validate()?;

        let result = self.conn.execute(
            "INSERT INTO movies (
                id,
                title,
                director,
                release_year,
                genre,
                rating,
                watched_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                movie.id.to_string(),
                movie.title.as_str(),
                movie.director.as_str(),
                movie.release_year,
                movie.genre.as_deref(),
                movie.rating,
                movie.watched_date.as_deref(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_primary_key_violation(&err) => {
                Err(RepoError::DuplicateId(movie.id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_movie(&self, id: &str, patch: &MoviePatch) -> RepoResult<Movie> {
        patch.validate()?;

        if patch.is_empty() {
            // Nothing to write; degrade to a lookup so absent ids still
            // surface as NotFound.
            return self
                .get_movie(id)?
                .ok_or_else(|| RepoError::NotFound(id.to_string()));
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = &patch.title {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(director) = &patch.director {
            assignments.push("director = ?");
            bind_values.push(Value::Text(director.clone()));
        }
        if let Some(release_year) = patch.release_year {
            assignments.push("release_year = ?");
            bind_values.push(Value::Integer(i64::from(release_year)));
        }
        match &patch.genre {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(genre) => {
                assignments.push("genre = ?");
                bind_values.push(Value::Text(genre.clone()));
            }
            FieldUpdate::Clear => assignments.push("genre = NULL"),
        }
        match patch.rating {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(rating) => {
                assignments.push("rating = ?");
                bind_values.push(Value::Real(rating));
            }
            FieldUpdate::Clear => assignments.push("rating = NULL"),
        }
        match &patch.watched_date {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(date) => {
                assignments.push("watched_date = ?");
                bind_values.push(Value::Text(date.clone()));
            }
            FieldUpdate::Clear => assignments.push("watched_date = NULL"),
        }

        let sql = format!("UPDATE movies SET {} WHERE id = ?;", assignments.join(", "));
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        self.get_movie(id)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))
    }

    fn delete_movie(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM movies WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

fn parse_movie_row(row: &Row<'_>) -> RepoResult<Movie> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in movies.id"))
    })?;

    let movie = Movie {
        id,
        title: row.get("title")?,
        director: row.get("director")?,
        release_year: row.get("release_year")?,
        genre: row.get("genre")?,
        rating: row.get("rating")?,
        watched_date: row.get("watched_date")?,
    };
    movie.validate()?;
    Ok(movie)
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && matches!(
                    failure.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                )
        }
        _ => false,
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "movies")? {
        return Err(RepoError::MissingRequiredTable("movies"));
    }

    for column in MOVIE_COLUMNS {
        if !table_has_column(conn, "movies", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "movies",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
