//! Person types — the single entity the service stores.
//!
//! A person is written once and never updated. Alongside every person the
//! store keeps a derived search blob (see [`NewPerson::search_blob`]) that
//! backs substring search.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Person ──────────────────────────────────────────────────────────────────

/// A persisted person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  /// Store-assigned; never changes after creation.
  pub id:         Uuid,
  pub name:       String,
  /// Unique across all persons.
  pub nickname:   String,
  /// Fixed `yyyy-mm-dd` format, kept verbatim as submitted.
  pub birth_date: String,
  /// `None` when the caller omitted the field, which is distinct from an
  /// empty list.
  pub stack:      Option<Vec<String>>,
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// A person that has passed [`crate::validate`] and is ready to be stored.
///
/// Only the validator constructs these outside of tests, so a `NewPerson`
/// always satisfies the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub name:       String,
  pub nickname:   String,
  pub birth_date: String,
  pub stack:      Option<Vec<String>>,
}

impl NewPerson {
  /// The searchable text for this person: name, nickname, then each stack
  /// element in order, with no separators.
  pub fn search_blob(&self) -> String {
    let stack = self.stack.as_deref().unwrap_or_default();
    let capacity = self.name.len()
      + self.nickname.len()
      + stack.iter().map(String::len).sum::<usize>();

    let mut blob = String::with_capacity(capacity);
    blob.push_str(&self.name);
    blob.push_str(&self.nickname);
    for item in stack {
      blob.push_str(item);
    }
    blob
  }

  /// Attach a store-assigned id.
  pub fn into_person(self, id: Uuid) -> Person {
    Person {
      id,
      name: self.name,
      nickname: self.nickname,
      birth_date: self.birth_date,
      stack: self.stack,
    }
  }
}
