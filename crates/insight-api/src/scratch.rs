//! Scratch directory for in-flight uploads.
//!
//! Each upload is streamed into its own uniquely named file. The
//! [`ScratchFile`] guard deletes that file when dropped, so it disappears on
//! success, on error and on early return alike. Anything still listed by
//! [`ScratchDir::list`] was left behind by a crash, not by normal operation.

use std::{
  io,
  path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt as _;

/// The directory uploads are staged in.
#[derive(Debug, Clone)]
pub struct ScratchDir {
  root: PathBuf,
}

/// A file found in the scratch directory.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
  pub name:     String,
  pub size:     u64,
  pub modified: DateTime<Utc>,
}

impl ScratchDir {
  pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

  pub fn root(&self) -> &Path { &self.root }

  /// Create an empty scratch file named after the client's file name.
  ///
  /// The name is reduced to safe characters and made unique, so two uploads
  /// of `data.csv` never collide.
  pub fn create(&self, client_name: &str) -> io::Result<ScratchFile> {
    let (stem, ext) = client_name.rsplit_once('.').unwrap_or((client_name, ""));
    let stem = sanitize(stem);
    let ext = sanitize(ext);

    let named = tempfile::Builder::new()
      .prefix(&format!("{stem}-"))
      .suffix(&if ext.is_empty() { String::new() } else { format!(".{ext}") })
      .tempfile_in(&self.root)?;
    let (file, path) = named.into_parts();

    Ok(ScratchFile {
      file: tokio::fs::File::from_std(file),
      path,
    })
  }

  /// List the regular files currently in the directory, sorted by name.
  ///
  /// A missing directory lists as empty.
  pub async fn list(&self) -> io::Result<Vec<FileInfo>> {
    let mut entries = match tokio::fs::read_dir(&self.root).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
      let meta = entry.metadata().await?;
      if !meta.is_file() {
        continue;
      }
      files.push(FileInfo {
        name:     entry.file_name().to_string_lossy().into_owned(),
        size:     meta.len(),
        modified: meta.modified()?.into(),
      });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
  }
}

/// An upload staged on disk. Deleted when dropped.
pub struct ScratchFile {
  file: tokio::fs::File,
  path: TempPath,
}

impl ScratchFile {
  pub fn path(&self) -> &Path { &self.path }

  pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
    self.file.write_all(chunk).await
  }

  /// Flush what has been written and read the whole upload back.
  pub async fn read_all(&mut self) -> io::Result<Vec<u8>> {
    self.file.flush().await?;
    tokio::fs::read(&self.path).await
  }
}

/// Keep ASCII alphanumerics, `-` and `_`; cap the length.
fn sanitize(s: &str) -> String {
  let cleaned: String = s
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    .take(64)
    .collect();
  if cleaned.is_empty() { "upload".to_string() } else { cleaned }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn scratch_file_is_removed_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = ScratchDir::new(dir.path());

    let mut file = scratch.create("../../etc/report 2024.csv").unwrap();
    file.write_chunk(b"title\n").await.unwrap();
    file.write_chunk(b"A\n").await.unwrap();

    let path = file.path().to_path_buf();
    assert_eq!(path.parent(), Some(dir.path()));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("etcreport2024-"), "{name}");
    assert!(name.ends_with(".csv"), "{name}");
    assert_eq!(file.read_all().await.unwrap(), b"title\nA\n");

    drop(file);
    assert!(!path.exists());
  }

  #[tokio::test]
  async fn list_skips_directories_and_sorts_by_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.json"), b"[]").unwrap();
    std::fs::write(dir.path().join("a.csv"), b"title\n").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let files = ScratchDir::new(dir.path()).list().await.unwrap();

    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a.csv", "b.json"]);
    assert_eq!(files[0].size, 6);
  }

  #[tokio::test]
  async fn missing_directory_lists_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = ScratchDir::new(dir.path().join("absent"));
    assert!(scratch.list().await.unwrap().is_empty());
  }
}
