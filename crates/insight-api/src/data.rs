//! Handlers for the record endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/data` | Optional `?limit` and `?offset`; unparseable values fall back to the defaults |
//! | `GET`    | `/data/count` | `{count}` |
//! | `DELETE` | `/delete` | Removes every record; `{message, remaining}` |
//! | `POST`   | `/init` | Replaces everything with the two sample records |

use axum::{
  Json,
  extract::{Query, State},
};
use insight_core::{record::Record, store::RecordStore, upload::IngestMode};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  error::ApiError,
  ingest::{IngestSummary, commit},
  sample::sample_drafts,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query parameters. Values are parsed leniently: anything that is not
/// an integer counts as absent.
#[derive(Debug, Deserialize)]
pub struct PageParams {
  pub limit:  Option<String>,
  pub offset: Option<String>,
}

impl PageParams {
  /// Maximum number of records. Absent, unparseable or negative means no limit.
  pub fn limit(&self) -> Option<u64> {
    parse_int(self.limit.as_deref()).and_then(|l| u64::try_from(l).ok())
  }

  /// Records to skip. Absent or unparseable is 0; negative clamps to 0.
  pub fn offset(&self) -> u64 {
    parse_int(self.offset.as_deref()).map_or(0, |o| o.max(0).unsigned_abs())
  }
}

fn parse_int(raw: Option<&str>) -> Option<i64> { raw?.trim().parse().ok() }

/// `GET /data[?limit=<n>][&offset=<n>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<PageParams>,
) -> Result<Json<Vec<Record>>, ApiError>
where
  S: RecordStore,
{
  let records = state
    .store
    .page(params.limit(), params.offset())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

// ─── Count ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CountResponse {
  pub count: u64,
}

/// `GET /data/count`
pub async fn count<S>(State(state): State<AppState<S>>) -> Result<Json<CountResponse>, ApiError>
where
  S: RecordStore,
{
  let count = state
    .store
    .count()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(CountResponse { count }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
  pub message:   &'static str,
  /// Records left afterwards; non-zero only if a concurrent upload raced in.
  pub remaining: u64,
}

/// `DELETE /delete`
pub async fn delete_all<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<DeleteResponse>, ApiError>
where
  S: RecordStore,
{
  state
    .store
    .delete_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let remaining = state
    .store
    .count()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(remaining, "deleted all records");
  Ok(Json(DeleteResponse {
    message: "All data deleted successfully",
    remaining,
  }))
}

// ─── Init ─────────────────────────────────────────────────────────────────────

/// `POST /init`. Always leaves exactly the two sample records.
pub async fn init<S>(State(state): State<AppState<S>>) -> Result<Json<IngestSummary>, ApiError>
where
  S: RecordStore,
{
  let summary = commit(state.store.as_ref(), IngestMode::Replace, sample_drafts()).await?;
  Ok(Json(summary))
}
