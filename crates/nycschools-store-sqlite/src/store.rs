//! [`SqliteStore`]: the SQLite implementation of [`SchoolStore`].

use std::path::Path;

use nycschools_core::{school::MergedSchool, store::SchoolStore};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{decode_school, insert_school},
  schema::{SCHEMA, SCHOOL_COLUMNS},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A school cache backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
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
}

// ─── SchoolStore impl ────────────────────────────────────────────────────────

impl SchoolStore for SqliteStore {
  type Error = Error;

  async fn select_all(&self) -> Result<Vec<MergedSchool>> {
    let schools = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SCHOOL_COLUMNS} FROM schools ORDER BY name COLLATE NOCASE, dbn"
        ))?;
        let rows = stmt
          .query_map([], decode_school)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(schools)
  }

  async fn select_by_dbn(&self, dbn: &str) -> Result<Option<MergedSchool>> {
    let dbn = dbn.to_owned();

    let school = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SCHOOL_COLUMNS} FROM schools WHERE dbn = ?1"),
            rusqlite::params![dbn],
            decode_school,
          )
          .optional()?)
      })
      .await?;

    Ok(school)
  }

  async fn insert_all(&self, schools: Vec<MergedSchool>) -> Result<()> {
    let count = schools.len();

    self
      .conn
      .call(move |conn| {
        // Any failed row returns early and drops `tx`, which rolls back.
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO schools ({SCHOOL_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
          ))?;
          for school in &schools {
            insert_school(&mut stmt, school)?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(count, "committed school rows");
    Ok(())
  }
}
