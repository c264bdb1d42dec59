//! Handler for `GET /files`: what is sitting in the scratch directory.
//!
//! Uploads are removed after processing, so this normally lists nothing.
//! Entries here are leftovers, not an ingest history.

use axum::{Json, extract::State};
use insight_core::store::RecordStore;

use crate::{AppState, error::ApiError, scratch::FileInfo};

/// `GET /files` returns `[{name, size, modified}]`.
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<FileInfo>>, ApiError>
where
  S: RecordStore,
{
  Ok(Json(state.scratch.list().await?))
}
