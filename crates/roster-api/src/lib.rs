//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::PersonStore`]. TLS and transport concerns are the
//! caller's responsibility.

pub mod error;
pub mod persons;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::store::PersonStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route("/persons", get(persons::search::<S>).post(persons::create::<S>))
    .route("/persons/count", get(persons::count::<S>))
    .route("/persons/{id}", get(persons::get_one::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
