//! The `RecordStore` trait and the batch-write outcome types.
//!
//! The trait is implemented by storage backends (e.g.
//! `insight-store-sqlite`). The ingest coordinator and HTTP handlers depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  record::{Record, RecordDraft},
  upload::IngestMode,
};

// ─── Batch outcome ───────────────────────────────────────────────────────────

/// A record of a batch that could not be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
  /// Zero-based position of the record within the batch.
  pub index:  usize,
  pub reason: String,
}

/// Accumulated result of [`RecordStore::write_batch`].
///
/// Per-record failures land in `skipped` and never abort the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
  /// Ids of the inserted records, in batch order.
  pub inserted: Vec<i64>,
  pub skipped:  Vec<SkippedRecord>,
}

impl BatchOutcome {
  pub fn count(&self) -> usize { self.inserted.len() }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the record table.
///
/// Records are never updated in place. They are created by inserts and
/// destroyed only by [`delete_all`](RecordStore::delete_all).
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create the record table and its lookup indexes if they are absent.
  /// Idempotent.
  fn ensure_schema(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove every record. Succeeds on an already-empty table.
  fn delete_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist one draft and return its newly assigned id. The `added_date`
  /// timestamp is set by the store.
  fn insert_one(
    &self,
    draft: RecordDraft,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Number of stored records.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Records ordered by id, skipping `offset`. `None` returns everything
  /// after the offset.
  fn page(
    &self,
    limit: Option<u64>,
    offset: u64,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Write a batch, clearing the table first in [`IngestMode::Replace`].
  ///
  /// Each draft is inserted independently; a failing draft is recorded in
  /// [`BatchOutcome::skipped`] and the rest of the batch continues. Only a
  /// failure of the replace-delete itself is returned as an error.
  ///
  /// This default composes [`delete_all`](RecordStore::delete_all) and
  /// [`insert_one`](RecordStore::insert_one) as separate operations, so
  /// concurrent readers may observe the table empty mid-batch. Backends with
  /// transactions should override it.
  fn write_batch(
    &self,
    mode: IngestMode,
    drafts: Vec<RecordDraft>,
  ) -> impl Future<Output = Result<BatchOutcome, Self::Error>> + Send + '_ {
    async move {
      if mode == IngestMode::Replace {
        self.delete_all().await?;
      }

      let mut outcome = BatchOutcome::default();
      for (index, draft) in drafts.into_iter().enumerate() {
        match self.insert_one(draft).await {
          Ok(id) => outcome.inserted.push(id),
          Err(e) => outcome.skipped.push(SkippedRecord {
            index,
            reason: e.to_string(),
          }),
        }
      }
      Ok(outcome)
    }
  }
}
