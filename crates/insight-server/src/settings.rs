//! Runtime server configuration, deserialised from `config.toml` and
//! `INSIGHT_*` environment variables. Every key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  pub upload_dir:       PathBuf,
  pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "127.0.0.1".to_string(),
      port:             5000,
      store_path:       PathBuf::from("data.db"),
      upload_dir:       PathBuf::from("uploads"),
      max_upload_bytes: 50 * 1024 * 1024,
    }
  }
}

impl ServerConfig {
  /// Resolve `~/` in the configured paths.
  pub fn expanded(mut self) -> Self {
    self.store_path = expand_tilde(&self.store_path);
    self.upload_dir = expand_tilde(&self.upload_dir);
    self
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
