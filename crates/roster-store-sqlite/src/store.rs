//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, TransactionBehavior};
use uuid::Uuid;

use roster_core::{
  person::{NewPerson, Person},
  store::PersonStore,
};

use crate::{
  Error, Result,
  encode::{RawPerson, encode_stack, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster person store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All clones
/// share one connection thread, so statements from concurrent callers are
/// serialised there and each closure passed to it runs to completion before
/// the next one starts.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Any remaining clones fail with a
  /// database error afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert the person row and its search index row in one transaction.
  async fn insert_person(&self, person: NewPerson) -> Result<Uuid> {
    let id = Uuid::new_v4();

    let id_str     = encode_uuid(id);
    let blob       = person.search_blob();
    let stack_json = encode_stack(person.stack.as_deref())?;
    let nickname   = person.nickname.clone();
    let NewPerson { name, birth_date, .. } = person;

    let created: bool = self
      .conn
      .call(move |conn| {
        // IMMEDIATE takes the write lock up front, so the UNIQUE check and
        // both inserts see one consistent snapshot.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let inserted = tx.execute(
          "INSERT INTO persons (id, name, nickname, birth_date, stack)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, nickname, birth_date, stack_json],
        );
        match inserted {
          Ok(_) => {}
          // Dropping `tx` rolls back.
          Err(e) if is_unique_violation(&e) => return Ok(false),
          Err(e) => return Err(e.into()),
        }

        tx.execute(
          "INSERT INTO search_index (blob, person_id) VALUES (?1, ?2)",
          rusqlite::params![blob, id_str],
        )?;

        tx.commit()?;
        Ok(true)
      })
      .await?;

    if created {
      tracing::debug!(%id, "person created");
      Ok(id)
    } else {
      Err(Error::NicknameTaken(person.nickname))
    }
  }

  async fn fetch_person(&self, id: Uuid) -> Result<Person> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM persons WHERE id = ?1", RawPerson::COLUMNS),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::PersonNotFound(id))?
      .into_person()
  }

  async fn find_by_term(&self, term: &str) -> Result<Vec<Person>> {
    let term = term.to_owned();

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        // `instr` is a case-sensitive substring test and treats `%`/`_`
        // literally, unlike LIKE.
        let ids = conn
          .prepare(
            "SELECT DISTINCT person_id FROM search_index WHERE instr(blob, ?1) > 0",
          )?
          .query_map(rusqlite::params![term], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut by_id = conn.prepare(&format!(
          "SELECT {} FROM persons WHERE id = ?1",
          RawPerson::COLUMNS
        ))?;

        // An id whose person has vanished is skipped rather than reported.
        let mut rows = Vec::with_capacity(ids.len());
        for id in ids {
          if let Some(raw) = by_id
            .query_row(rusqlite::params![id], RawPerson::from_row)
            .optional()?
          {
            rows.push(raw);
          }
        }
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM persons", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n as u64)
  }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  async fn create_person(&self, person: NewPerson) -> roster_core::Result<Uuid> {
    Ok(self.insert_person(person).await?)
  }

  async fn get_person(&self, id: Uuid) -> roster_core::Result<Person> {
    Ok(self.fetch_person(id).await?)
  }

  async fn search_persons(&self, term: &str) -> roster_core::Result<Vec<Person>> {
    Ok(self.find_by_term(term).await?)
  }

  async fn count_persons(&self) -> roster_core::Result<u64> {
    Ok(self.count().await?)
  }
}
