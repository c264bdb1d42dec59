//! Declared upload format and ingest mode.

use strum::{Display, EnumString};

use crate::{Error, Result};

/// Input format of an upload, derived from the file name extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
  Json,
  Csv,
  /// `.xlsx` or `.xls`; the workbook flavour is detected by the decoder.
  Spreadsheet,
}

impl Format {
  /// Map an extension (without the dot, any case) to a format.
  pub fn from_extension(ext: &str) -> Result<Self> {
    match ext.to_ascii_lowercase().as_str() {
      "json" => Ok(Format::Json),
      "csv" => Ok(Format::Csv),
      "xlsx" | "xls" => Ok(Format::Spreadsheet),
      _ => Err(Error::UnsupportedExtension(ext.to_owned())),
    }
  }

  /// Map a client-supplied file name to a format via its last extension.
  pub fn from_filename(name: &str) -> Result<Self> {
    let (_, ext) = name
      .rsplit_once('.')
      .ok_or_else(|| Error::MissingExtension(name.to_owned()))?;
    Self::from_extension(ext)
  }
}

/// Whether an ingest clears the table first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IngestMode {
  #[default]
  Replace,
  Append,
}

impl IngestMode {
  /// Interpret the optional `option` form field of an upload.
  ///
  /// Anything other than `append` (in any case) means replace.
  pub fn from_option(option: Option<&str>) -> Self {
    option
      .and_then(|s| s.trim().parse().ok())
      .unwrap_or_default()
  }
}
