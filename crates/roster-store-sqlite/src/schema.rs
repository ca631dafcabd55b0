//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA busy_timeout = 5000;
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Persons are insert-only.
CREATE TABLE IF NOT EXISTS persons (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 100),
    nickname    TEXT NOT NULL UNIQUE CHECK (length(nickname) BETWEEN 1 AND 32),
    birth_date  TEXT NOT NULL CHECK (length(birth_date) = 10),
    stack       TEXT             -- JSON array of strings, or NULL if omitted
);

-- Derived from persons; written in the same transaction as its person.
CREATE TABLE IF NOT EXISTS search_index (
    id          INTEGER PRIMARY KEY,
    blob        TEXT NOT NULL,   -- name || nickname || stack items, no separators
    person_id   TEXT NOT NULL REFERENCES persons(id)
);

CREATE INDEX IF NOT EXISTS search_index_person_idx ON search_index(person_id);

PRAGMA user_version = 1;
";
