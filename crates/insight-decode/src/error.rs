//! Error type for `insight-decode`.

use thiserror::Error;

/// A whole-batch decode failure. Carries a human-readable cause.
#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed JSON: {0}")]
  MalformedJson(String),

  #[error("malformed table: {0}")]
  MalformedTable(String),

  #[error("malformed spreadsheet: {0}")]
  MalformedSpreadsheet(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
