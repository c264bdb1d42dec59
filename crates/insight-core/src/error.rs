//! Error types for `insight-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("file name has no extension: {0:?}")]
  MissingExtension(String),

  #[error("file type not allowed: {0:?}")]
  UnsupportedExtension(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
