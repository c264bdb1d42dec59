//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use insight_core::{
  record::{Record, RecordDraft},
  store::{BatchOutcome, RecordStore, SkippedRecord},
  upload::IngestMode,
};

use crate::{
  Result,
  encode::{RawRecord, encode_dt},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An insight record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }
}

/// Insert one draft on `conn`, stamping it with the current time.
fn insert_draft(conn: &rusqlite::Connection, draft: &RecordDraft) -> rusqlite::Result<i64> {
  conn.execute(
    "INSERT INTO records (
       title, topic, sector, region, country, source, end_year,
       intensity, likelihood, relevance, pest, swot, url, added_date
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
    rusqlite::params![
      draft.title,
      draft.topic,
      draft.sector,
      draft.region,
      draft.country,
      draft.source,
      draft.end_year,
      draft.intensity,
      draft.likelihood,
      draft.relevance,
      draft.pest,
      draft.swot,
      draft.url,
      encode_dt(Utc::now()),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn ensure_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_all(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM records", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_one(&self, draft: RecordDraft) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| Ok(insert_draft(conn, &draft)?))
      .await?;
    Ok(id)
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?))
      .await?;
    Ok(n as u64)
  }

  async fn page(&self, limit: Option<u64>, offset: u64) -> Result<Vec<Record>> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val  = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let offset_val = i64::try_from(offset).unwrap_or(i64::MAX);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COLUMNS} FROM records ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val, offset_val], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  /// Replace-delete and every insert run in one transaction on the
  /// connection thread, so readers never see the table half-written and
  /// concurrent batches cannot interleave. Each insert gets its own
  /// savepoint; a failing record is rolled back alone and reported as
  /// skipped.
  async fn write_batch(
    &self,
    mode:   IngestMode,
    drafts: Vec<RecordDraft>,
  ) -> Result<BatchOutcome> {
    let outcome = self
      .conn
      .call(move |conn| {
        let mut tx = conn.transaction()?;
        if mode == IngestMode::Replace {
          tx.execute("DELETE FROM records", [])?;
        }

        let mut outcome = BatchOutcome::default();
        for (index, draft) in drafts.iter().enumerate() {
          let sp = tx.savepoint()?;
          match insert_draft(&sp, draft) {
            Ok(id) => {
              sp.commit()?;
              outcome.inserted.push(id);
            }
            // Dropping the savepoint rolls the failed insert back.
            Err(e) => outcome.skipped.push(SkippedRecord {
              index,
              reason: e.to_string(),
            }),
          }
        }

        tx.commit()?;
        Ok(outcome)
      })
      .await?;
    Ok(outcome)
  }
}
