//! Error types for `roster-core`.
//!
//! This is the only error type that crosses a [`PersonStore`] boundary;
//! backends translate their own failures into [`Error::Storage`].
//!
//! [`PersonStore`]: crate::store::PersonStore

use thiserror::Error;
use uuid::Uuid;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid person: {0}")]
  Validation(#[from] ValidationError),

  /// The nickname is already held by another person.
  #[error("nickname already taken: {nickname:?}")]
  Conflict { nickname: String },

  #[error("person not found: {0}")]
  NotFound(Uuid),

  #[error("storage failure: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap any backend error as a [`Error::Storage`].
  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
