//! Handler for `POST /upload`.
//!
//! Multipart fields:
//!
//! | Field | Notes |
//! |-------|-------|
//! | `file` | Required. Extension must be `json`, `csv`, `xlsx` or `xls` (any case). |
//! | `option` | `replace` (default) or `append`. |
//!
//! The file is streamed into the scratch directory and removed again before
//! the response is sent, whatever the outcome.

use axum::{
  Json,
  extract::{
    Multipart, State,
    multipart::{Field, MultipartRejection},
  },
};
use insight_core::{
  store::RecordStore,
  upload::{Format, IngestMode},
};

use crate::{
  AppState,
  error::ApiError,
  ingest::{IngestSummary, RawUpload, ingest},
  scratch::{ScratchDir, ScratchFile},
};

/// `POST /upload`: returns `{count, message}`.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<IngestSummary>, ApiError>
where
  S: RecordStore,
{
  // A request that is not multipart at all has no file part either.
  let mut multipart = multipart.map_err(|e| {
    tracing::debug!(error = %e, "upload is not multipart");
    ApiError::BadRequest("No file part".to_string())
  })?;

  let mut staged: Option<(Format, ScratchFile)> = None;
  let mut option: Option<String> = None;

  while let Some(field) = multipart.next_field().await? {
    let name = field.name().map(str::to_owned);
    match name.as_deref() {
      Some("file") => staged = Some(stage(&state.scratch, field).await?),
      Some("option") => option = Some(field.text().await?),
      _ => {}
    }
  }

  let (format, mut file) =
    staged.ok_or_else(|| ApiError::BadRequest("No file part".to_string()))?;
  let mode  = IngestMode::from_option(option.as_deref());
  let bytes = file.read_all().await?;

  let summary = ingest(state.store.as_ref(), RawUpload { format, mode, bytes }).await?;
  Ok(Json(summary))
}

/// Validate the file part's name and stream its body to a scratch file.
async fn stage(
  scratch:   &ScratchDir,
  mut field: Field<'_>,
) -> Result<(Format, ScratchFile), ApiError> {
  let client_name = field.file_name().unwrap_or_default().to_owned();
  if client_name.is_empty() {
    return Err(ApiError::BadRequest("No selected file".to_string()));
  }
  let format = Format::from_filename(&client_name).map_err(|e| {
    tracing::debug!(error = %e, "rejected upload");
    ApiError::BadRequest("File type not allowed".to_string())
  })?;

  let mut file = scratch.create(&client_name)?;
  while let Some(chunk) = field.chunk().await? {
    file.write_chunk(&chunk).await?;
  }
  tracing::debug!(path = %file.path().display(), %format, "staged upload");
  Ok((format, file))
}
