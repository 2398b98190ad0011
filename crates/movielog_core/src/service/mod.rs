//! Use-case service layer.
//!
//! # Responsibility
//! - Provide stable entry points for presentation-layer callers.
//! - Delegate persistence to repository implementations.

pub mod movie_service;
