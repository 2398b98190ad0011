//! Movie use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic and holds no state between calls.

use crate::model::movie::{Movie, MoviePatch};
use crate::repo::movie_repo::{MovieRepository, RepoResult};

/// Use-case service wrapper for movie CRUD operations.
pub struct MovieService<R: MovieRepository> {
    repo: R,
}

impl<R: MovieRepository> MovieService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all movies in store insertion order.
    pub fn list_movies(&self) -> RepoResult<Vec<Movie>> {
        self.repo.list_movies()
    }

    /// Gets one movie by candidate id. Absent ids return `Ok(None)`.
    pub fn get_movie(&self, id: &str) -> RepoResult<Option<Movie>> {
        self.repo.get_movie(id)
    }

    /// Creates a movie through repository persistence.
    ///
    /// The record id must already be set by the caller; neither service
    /// nor repository generates identifiers.
    pub fn create_movie(&self, movie: &Movie) -> RepoResult<()> {
        self.repo.create_movie(movie)
    }

    /// Merges a partial update into an existing movie.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_movie(&self, id: &str, patch: &MoviePatch) -> RepoResult<Movie> {
        self.repo.update_movie(id, patch)
    }

    /// Permanently removes a movie by id.
    pub fn delete_movie(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_movie(id)
    }
}
