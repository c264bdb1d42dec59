//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::multipart::MultipartError,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::IngestError;

/// An error returned by an API handler.
///
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request is missing something or names a disallowed file.
  #[error("{0}")]
  BadRequest(String),

  #[error(transparent)]
  Decode(#[from] insight_decode::Error),

  #[error("multipart error: {0}")]
  Multipart(#[from] MultipartError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<IngestError> for ApiError {
  fn from(e: IngestError) -> Self {
    match e {
      IngestError::Decode(e) => ApiError::Decode(e),
      IngestError::Store(e) => ApiError::Store(e),
      IngestError::Worker(e) => ApiError::Internal(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Decode(e) => (StatusCode::BAD_REQUEST, e.to_string()),
      ApiError::Multipart(e) => (e.status(), e.body_text()),
      ApiError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": message }))).into_response()
  }
}
