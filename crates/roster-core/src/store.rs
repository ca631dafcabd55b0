//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  person::{NewPerson, Person},
};

/// Abstraction over a Roster person store backend.
///
/// Backends own both the person rows and the derived search index and must
/// keep them consistent: a person exists iff exactly one index entry holding
/// its [`NewPerson::search_blob`] exists. Nickname uniqueness is enforced by
/// the backing store itself, never by a read-then-write check.
///
/// Every error a backend returns is already translated into
/// [`crate::Error`]; no backend error type escapes.
pub trait PersonStore: Send + Sync {
  /// Persist `person` and its search index entry atomically and return the
  /// new id.
  ///
  /// Fails with [`crate::Error::Conflict`] if the nickname is taken, in which
  /// case nothing is written.
  fn create_person(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  /// Fetch a person by id. Fails with [`crate::Error::NotFound`].
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Person>> + Send + '_;

  /// All persons whose search blob contains `term` (case-sensitive). Each
  /// person appears at most once; order is unspecified.
  ///
  /// `term` must be non-empty; rejecting an empty term is the caller's job.
  fn search_persons<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Person>>> + Send + 'a;

  /// Total number of stored persons.
  fn count_persons(&self) -> impl Future<Output = Result<u64>> + Send + '_;
}
