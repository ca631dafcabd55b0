//! Payload validation for person creation.
//!
//! [`validate`] is pure: it looks only at the request and either hands back a
//! [`NewPerson`] or the first rule the request breaks. Lengths are counted in
//! Unicode scalar values, not bytes.

use std::ops::RangeInclusive;

use serde::Deserialize;
use thiserror::Error;

use crate::person::NewPerson;

pub const NAME_LEN: RangeInclusive<usize> = 1..=100;
pub const NICKNAME_LEN: RangeInclusive<usize> = 1..=32;
pub const STACK_ITEM_LEN: RangeInclusive<usize> = 1..=32;

// ─── Request ─────────────────────────────────────────────────────────────────

/// An unvalidated creation payload as it arrives on the wire.
///
/// Every field may be missing or `null`. Unknown fields are ignored. The
/// Portuguese field names of the Rinha de Backend payload (`nome`, `apelido`,
/// `nascimento`) are accepted as aliases. Sending both names for one field
/// (e.g. `name` and `nome`) is a duplicate-field deserialisation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonCreateRequest {
  #[serde(default, alias = "nome")]
  pub name:       Option<String>,
  #[serde(default, alias = "apelido")]
  pub nickname:   Option<String>,
  #[serde(default, alias = "nascimento", alias = "birthDate")]
  pub birth_date: Option<String>,
  #[serde(default)]
  pub stack:      Option<Vec<String>>,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// The rule a [`PersonCreateRequest`] failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} is required")]
  Missing(&'static str),

  #[error("{field} must be {min} to {max} characters, got {len}")]
  Length {
    field: &'static str,
    min:   usize,
    max:   usize,
    len:   usize,
  },

  #[error("birth_date must be yyyy-mm-dd, got {0:?}")]
  BirthDate(String),

  #[error("stack[{index}] must be {min} to {max} characters, got {len}")]
  StackItem {
    index: usize,
    min:   usize,
    max:   usize,
    len:   usize,
  },
}

// ─── Validator ───────────────────────────────────────────────────────────────

/// Check `request` against the field rules and return the storable person.
///
/// Rules are checked in field order (name, nickname, birth date, stack) and
/// the first failure is reported.
pub fn validate(
  request: PersonCreateRequest,
) -> Result<NewPerson, ValidationError> {
  let name = request.name.ok_or(ValidationError::Missing("name"))?;
  check_len("name", &name, NAME_LEN)?;

  let nickname = request.nickname.ok_or(ValidationError::Missing("nickname"))?;
  check_len("nickname", &nickname, NICKNAME_LEN)?;

  let birth_date = request
    .birth_date
    .ok_or(ValidationError::Missing("birth_date"))?;
  if !is_birth_date(&birth_date) {
    return Err(ValidationError::BirthDate(birth_date));
  }

  if let Some(stack) = &request.stack {
    for (index, item) in stack.iter().enumerate() {
      let len = item.chars().count();
      if !STACK_ITEM_LEN.contains(&len) {
        return Err(ValidationError::StackItem {
          index,
          min: *STACK_ITEM_LEN.start(),
          max: *STACK_ITEM_LEN.end(),
          len,
        });
      }
    }
  }

  Ok(NewPerson { name, nickname, birth_date, stack: request.stack })
}

fn check_len(
  field: &'static str,
  value: &str,
  range: RangeInclusive<usize>,
) -> Result<(), ValidationError> {
  let len = value.chars().count();
  if range.contains(&len) {
    Ok(())
  } else {
    Err(ValidationError::Length {
      field,
      min: *range.start(),
      max: *range.end(),
      len,
    })
  }
}

/// `yyyy-mm-dd` by shape only: digits in the year, month and day slots and
/// `-` at offsets 4 and 7. No calendar check, so `2000-13-99` passes.
fn is_birth_date(s: &str) -> bool {
  let bytes = s.as_bytes();
  bytes.len() == 10
    && bytes.iter().enumerate().all(|(i, b)| match i {
      4 | 7 => *b == b'-',
      _ => b.is_ascii_digit(),
    })
}
