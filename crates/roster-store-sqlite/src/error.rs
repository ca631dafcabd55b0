//! Error type for `roster-store-sqlite`.
//!
//! Callers going through [`roster_core::store::PersonStore`] never see this
//! type; it is translated into [`roster_core::Error`] at the trait boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// The `nickname` UNIQUE constraint rejected the insert.
  #[error("nickname already taken: {0:?}")]
  NicknameTaken(String),

  #[error("person not found: {0}")]
  PersonNotFound(uuid::Uuid),
}

impl From<Error> for roster_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::NicknameTaken(nickname) => Self::Conflict { nickname },
      Error::PersonNotFound(id) => Self::NotFound(id),
      other => Self::storage(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
