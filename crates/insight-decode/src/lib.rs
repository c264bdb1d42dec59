//! Format decoders for insight uploads.
//!
//! Each decoder turns raw upload bytes into a sequence of loosely-typed
//! [`FieldMapping`]s. Pure synchronous; no HTTP or database dependencies.
//! Decoder selection is by declared [`Format`] only; content is never sniffed.
//!
//! # Quick start
//!
//! ```no_run
//! use insight_core::upload::Format;
//!
//! let rows = insight_decode::decode(Format::Csv, b"title,topic\nOil,energy\n").unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

pub mod delimited;
pub mod error;
pub mod json;
pub mod spreadsheet;

pub use error::{Error, Result};
use insight_core::{field::FieldMapping, upload::Format};

/// Decode `input` with the decoder for `format`.
pub fn decode(format: Format, input: &[u8]) -> Result<Vec<FieldMapping>> {
  match format {
    Format::Json => json::decode(input),
    Format::Csv => delimited::decode(input),
    Format::Spreadsheet => spreadsheet::decode(input),
  }
}
