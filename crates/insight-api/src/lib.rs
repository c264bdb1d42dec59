//! JSON REST API for the insight ingest service.
//!
//! Exposes an axum [`Router`] backed by any [`insight_core::store::RecordStore`].
//! TLS and process concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = insight_api::app(state, 50 * 1024 * 1024);
//! axum::serve(listener, app).await?;
//! ```

pub mod data;
pub mod error;
pub mod files;
pub mod ingest;
pub mod sample;
pub mod scratch;
pub mod upload;

use std::sync::Arc;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{delete, get, post},
};
use insight_core::store::RecordStore;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

pub use error::ApiError;
use scratch::ScratchDir;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. The store handle is built
/// once at startup; handlers never reach for a global connection.
pub struct AppState<S> {
  pub store:   Arc<S>,
  pub scratch: Arc<ScratchDir>,
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      scratch: Arc::clone(&self.scratch),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API routes (without the `/api` prefix).
///
/// Request bodies are capped at `max_upload_bytes`.
pub fn api_router<S>(state: AppState<S>, max_upload_bytes: usize) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/upload", post(upload::handler::<S>))
    .route("/data", get(data::list::<S>))
    .route("/data/count", get(data::count::<S>))
    .route("/delete", delete(data::delete_all::<S>))
    .route("/init", post(data::init::<S>))
    .route("/files", get(files::list::<S>))
    .layer(DefaultBodyLimit::max(max_upload_bytes))
    .with_state(state)
}

/// The full application: API routes under `/api`, permissive CORS and
/// request tracing.
pub fn app<S>(state: AppState<S>, max_upload_bytes: usize) -> Router
where
  S: RecordStore + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods(Any)
    .allow_headers(Any);

  Router::new()
    .nest("/api", api_router(state, max_upload_bytes))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
