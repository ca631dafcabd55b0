//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings. `stack` is stored as a
//! compact JSON array, or NULL when the caller omitted it.

use roster_core::person::Person;
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Stack ────────────────────────────────────────────────────────────────────

pub fn encode_stack(stack: Option<&[String]>) -> Result<Option<String>> {
  Ok(stack.map(serde_json::to_string).transpose()?)
}

pub fn decode_stack(s: Option<&str>) -> Result<Option<Vec<String>>> {
  Ok(s.map(serde_json::from_str).transpose()?)
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// Column values of one `persons` row, as read from SQLite.
pub struct RawPerson {
  pub id:         String,
  pub name:       String,
  pub nickname:   String,
  pub birth_date: String,
  pub stack:      Option<String>,
}

impl RawPerson {
  pub const COLUMNS: &'static str = "id, name, nickname, birth_date, stack";

  /// Row mapper for queries selecting [`Self::COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      nickname:   row.get(2)?,
      birth_date: row.get(3)?,
      stack:      row.get(4)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      nickname:   self.nickname,
      birth_date: self.birth_date,
      stack:      decode_stack(self.stack.as_deref())?,
    })
  }
}
