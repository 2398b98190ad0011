//! Movie catalog domain model.
//!
//! # Responsibility
//! - Define the canonical movie record used by repository and callers.
//! - Define the partial-update shape for merge-style mutations.
//!
//! # Invariants
//! - Every record is identified by a stable caller-generated `MovieId`.
//! - Deletion is a hard delete; no tombstones or audit trail exist.

pub mod movie;
