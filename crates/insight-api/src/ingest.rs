//! Ingest coordinator: decode an upload, normalize every row and commit the
//! batch through a [`RecordStore`].
//!
//! Only whole-batch conditions fail an ingest. A record the store rejects is
//! logged and left out of the count; it never aborts the rest of the batch.

use insight_core::{
  normalize::normalize,
  record::RecordDraft,
  store::RecordStore,
  upload::{Format, IngestMode},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An upload ready for ingest.
#[derive(Debug, Clone)]
pub struct RawUpload {
  pub format: Format,
  pub mode:   IngestMode,
  pub bytes:  Vec<u8>,
}

/// Result of an ingest as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
  pub count:   usize,
  pub message: String,
}

impl IngestSummary {
  pub fn new(count: usize) -> Self {
    Self {
      count,
      message: format!("Successfully processed {count} records"),
    }
  }
}

#[derive(Debug, Error)]
pub enum IngestError {
  #[error(transparent)]
  Decode(#[from] insight_decode::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("decoder task failed: {0}")]
  Worker(#[from] tokio::task::JoinError),
}

/// Decode `upload` and commit its records.
///
/// Decoding runs on a blocking worker. A decode failure returns before the
/// store is touched, so a malformed replace upload keeps the old data.
pub async fn ingest<S>(store: &S, upload: RawUpload) -> Result<IngestSummary, IngestError>
where
  S: RecordStore,
{
  let RawUpload { format, mode, bytes } = upload;
  let mappings =
    tokio::task::spawn_blocking(move || insight_decode::decode(format, &bytes)).await??;

  let drafts = mappings.iter().map(normalize).collect();
  tracing::debug!(%format, %mode, rows = mappings.len(), "decoded upload");
  commit(store, mode, drafts).await
}

/// Write already-normalized drafts and summarise the outcome.
pub async fn commit<S>(
  store:  &S,
  mode:   IngestMode,
  drafts: Vec<RecordDraft>,
) -> Result<IngestSummary, IngestError>
where
  S: RecordStore,
{
  let submitted = drafts.len();
  let outcome = store
    .write_batch(mode, drafts)
    .await
    .map_err(|e| IngestError::Store(Box::new(e)))?;

  for skipped in &outcome.skipped {
    tracing::warn!(index = skipped.index, reason = %skipped.reason, "skipped record");
  }
  tracing::info!(
    %mode,
    submitted,
    inserted = outcome.count(),
    skipped = outcome.skipped.len(),
    "batch committed"
  );

  Ok(IngestSummary::new(outcome.count()))
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use insight_core::record::Record;

  use super::*;

  /// In-memory store that refuses records titled `"bad"`. Uses the trait's
  /// default `write_batch`.
  #[derive(Default)]
  struct FlakyStore {
    rows:    Mutex<Vec<RecordDraft>>,
    deletes: Mutex<usize>,
  }

  #[derive(Debug, Error)]
  #[error("refused record {0:?}")]
  struct Refused(Option<String>);

  impl FlakyStore {
    fn titles(&self) -> Vec<String> {
      self
        .rows
        .lock()
        .unwrap()
        .iter()
        .map(|d| d.title.clone().unwrap_or_default())
        .collect()
    }
  }

  impl RecordStore for FlakyStore {
    type Error = Refused;

    async fn ensure_schema(&self) -> Result<(), Refused> { Ok(()) }

    async fn delete_all(&self) -> Result<(), Refused> {
      self.rows.lock().unwrap().clear();
      *self.deletes.lock().unwrap() += 1;
      Ok(())
    }

    async fn insert_one(&self, draft: RecordDraft) -> Result<i64, Refused> {
      if draft.title.as_deref() == Some("bad") {
        return Err(Refused(draft.title));
      }
      let mut rows = self.rows.lock().unwrap();
      rows.push(draft);
      Ok(rows.len() as i64)
    }

    async fn count(&self) -> Result<u64, Refused> { Ok(self.rows.lock().unwrap().len() as u64) }

    async fn page(&self, _limit: Option<u64>, _offset: u64) -> Result<Vec<Record>, Refused> {
      Ok(Vec::new())
    }
  }

  fn json_upload(mode: IngestMode, body: &str) -> RawUpload {
    RawUpload { format: Format::Json, mode, bytes: body.as_bytes().to_vec() }
  }

  #[tokio::test]
  async fn refused_records_are_skipped_not_propagated() {
    let store = FlakyStore::default();
    let upload = json_upload(
      IngestMode::Replace,
      r#"[{"title":"ok-1"},{"title":"bad"},{"title":"ok-2"},{"title":"bad"}]"#,
    );

    let summary = ingest(&store, upload).await.unwrap();

    assert_eq!(summary, IngestSummary::new(2));
    assert_eq!(summary.message, "Successfully processed 2 records");
    assert_eq!(store.titles(), ["ok-1", "ok-2"]);
  }

  #[tokio::test]
  async fn batch_of_only_refused_records_reports_zero() {
    let store = FlakyStore::default();
    let summary = ingest(&store, json_upload(IngestMode::Append, r#"{"title":"bad"}"#))
      .await
      .unwrap();
    assert_eq!(summary.count, 0);
  }

  #[tokio::test]
  async fn decode_failure_does_not_touch_the_store() {
    let store = FlakyStore::default();
    ingest(&store, json_upload(IngestMode::Append, r#"[{"title":"kept"}]"#))
      .await
      .unwrap();

    let err = ingest(&store, json_upload(IngestMode::Replace, "{not json"))
      .await
      .unwrap_err();

    assert!(matches!(err, IngestError::Decode(insight_decode::Error::MalformedJson(_))));
    assert_eq!(*store.deletes.lock().unwrap(), 0);
    assert_eq!(store.titles(), ["kept"]);
  }

  #[tokio::test]
  async fn append_keeps_and_replace_clears() {
    let store = FlakyStore::default();
    ingest(&store, json_upload(IngestMode::Append, r#"[{"title":"a"}]"#)).await.unwrap();
    ingest(&store, json_upload(IngestMode::Append, r#"[{"title":"b"}]"#)).await.unwrap();
    assert_eq!(store.titles(), ["a", "b"]);

    ingest(&store, json_upload(IngestMode::Replace, r#"[{"title":"c"}]"#)).await.unwrap();
    assert_eq!(store.titles(), ["c"]);
  }

  #[tokio::test]
  async fn csv_rows_are_normalized_before_commit() {
    let store = FlakyStore::default();
    let upload = RawUpload {
      format: Format::Csv,
      mode:   IngestMode::Replace,
      bytes:  b"title,end_year,likelihood,extra\nOil,2030,high,ignored\n".to_vec(),
    };

    ingest(&store, upload).await.unwrap();

    let rows = store.rows.lock().unwrap();
    assert_eq!(rows[0].end_year.as_deref(), Some("2030"));
    assert_eq!(rows[0].likelihood, None);
  }
}
