//! Movie record model.
//!
//! # Responsibility
//! - Define the canonical record persisted in the `movies` relation.
//! - Provide the partial-update shape consumed by `update_movie`.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `title` and `director` are never empty.
//! - Optional fields are `None` when absent, never `Some("")`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a movie record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MovieId = Uuid;

/// Validation failure for movie writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieValidationError {
    /// `title` is empty or whitespace-only.
    EmptyTitle,
    /// `director` is empty or whitespace-only.
    EmptyDirector,
    /// An optional text field carries an empty string instead of `None`.
    EmptyOptionalText(&'static str),
}

impl Display for MovieValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "movie title must not be empty"),
            Self::EmptyDirector => write!(f, "movie director must not be empty"),
            Self::EmptyOptionalText(field) => write!(
                f,
                "optional field `{field}` must be absent instead of empty"
            ),
        }
    }
}

impl Error for MovieValidationError {}

/// Canonical movie record.
///
/// The id is always generated by the caller before insertion; the
/// repository and the store never mint identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Stable global ID used for lookup, update and delete.
    pub id: MovieId,
    /// Display title. Required, non-empty.
    pub title: String,
    /// Director name. Required, non-empty.
    pub director: String,
    /// Four-digit release year. Digit-shape checks happen at input time.
    pub release_year: i32,
    /// Optional genre label.
    pub genre: Option<String>,
    /// Optional rating. The store enforces no range; 0-10 is a UI convention.
    pub rating: Option<f64>,
    /// Optional watch date kept as the original `DD/MM/YYYY` text,
    /// never parsed into a date type.
    pub watched_date: Option<String>,
}

impl Movie {
    /// Creates a record with a freshly generated stable ID.
    ///
    /// # Invariants
    /// - Optional fields are initialized to `None`.
    pub fn new(title: impl Into<String>, director: impl Into<String>, release_year: i32) -> Self {
        Self::with_id(Uuid::new_v4(), title, director, release_year)
    }

    /// Creates a record with a caller-provided stable ID.
    ///
    /// Used where identity already exists externally (tests, imports).
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this record lifetime.
    pub fn with_id(
        id: MovieId,
        title: impl Into<String>,
        director: impl Into<String>,
        release_year: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            director: director.into(),
            release_year,
            genre: None,
            rating: None,
            watched_date: None,
        }
    }

    /// Checks record invariants prior to persistence.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyDirector` for blank required fields.
    /// - `EmptyOptionalText` when an optional text field is `Some("")`.
    pub fn validate(&self) -> Result<(), MovieValidationError> {
        if self.title.trim().is_empty() {
            return Err(MovieValidationError::EmptyTitle);
        }
        if self.director.trim().is_empty() {
            return Err(MovieValidationError::EmptyDirector);
        }
        validate_optional_text("genre", self.genre.as_deref())?;
        validate_optional_text("watched_date", self.watched_date.as_deref())?;
        Ok(())
    }
}

/// Tri-state update marker for optional columns.
///
/// Distinguishes "leave unchanged" from "explicitly clear to NULL",
/// which plain `Option` cannot express in a patch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldUpdate<T> {
    /// Leave the stored value unchanged.
    #[default]
    Keep,
    /// Overwrite the stored value.
    Set(T),
    /// Clear the stored value to NULL.
    Clear,
}

impl<T> FieldUpdate<T> {
    /// Returns whether this field participates in the update.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Keep)
    }
}

/// Partial update for a movie record.
///
/// Required fields use `Option` (None = keep); optional columns use
/// `FieldUpdate` so clearing stays distinguishable from keeping.
/// The id is immutable and therefore not part of the patch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoviePatch {
    /// New title, when present.
    pub title: Option<String>,
    /// New director, when present.
    pub director: Option<String>,
    /// New release year, when present.
    pub release_year: Option<i32>,
    /// Genre change.
    pub genre: FieldUpdate<String>,
    /// Rating change.
    pub rating: FieldUpdate<f64>,
    /// Watched-date change, text form.
    pub watched_date: FieldUpdate<String>,
}

impl MoviePatch {
    /// Returns whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.director.is_none()
            && self.release_year.is_none()
            && !self.genre.is_change()
            && !self.rating.is_change()
            && !self.watched_date.is_change()
    }

    /// Checks patch invariants prior to persistence.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyDirector` when a required field is patched
    ///   to a blank value.
    /// - `EmptyOptionalText` when an optional text field is set to `""`
    ///   (clearing must use `FieldUpdate::Clear`).
    pub fn validate(&self) -> Result<(), MovieValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(MovieValidationError::EmptyTitle);
            }
        }
        if let Some(director) = &self.director {
            if director.trim().is_empty() {
                return Err(MovieValidationError::EmptyDirector);
            }
        }
        if let FieldUpdate::Set(genre) = &self.genre {
            validate_optional_text("genre", Some(genre))?;
        }
        if let FieldUpdate::Set(date) = &self.watched_date {
            validate_optional_text("watched_date", Some(date))?;
        }
        Ok(())
    }
}

fn validate_optional_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), MovieValidationError> {
    match value {
        Some(text) if text.trim().is_empty() => {
            Err(MovieValidationError::EmptyOptionalText(field))
        }
        _ => Ok(()),
    }
}
