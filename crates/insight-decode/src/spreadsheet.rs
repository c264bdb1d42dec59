//! Spreadsheet decoder (`.xlsx`, `.xls`).
//!
//! Behavior:
//! - reads the first worksheet only;
//! - the first row of the used range is the header;
//! - remaining rows map to field mappings like the CSV decoder, with native
//!   numeric and boolean cells kept as such;
//! - date cells become `YYYY-MM-DD HH:MM:SS` text;
//! - columns with an empty header are ignored. A row with no values inside
//!   the used range still yields an all-null mapping.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use insight_core::field::{FieldMapping, FieldValue};

use crate::{Error, Result};

/// Decode a workbook held in memory. The workbook flavour is detected from
/// its bytes, so `.xls` and `.xlsx` share this entry point.
pub fn decode(input: &[u8]) -> Result<Vec<FieldMapping>> {
  let mut workbook = open_workbook_auto_from_rs(Cursor::new(input)).map_err(sheet_error)?;

  let range = workbook
    .worksheet_range_at(0)
    .ok_or_else(|| Error::MalformedSpreadsheet("workbook has no worksheets".to_string()))?
    .map_err(sheet_error)?;

  Ok(decode_range(&range))
}

fn decode_range(range: &Range<Data>) -> Vec<FieldMapping> {
  let mut rows = range.rows();
  let Some(header_row) = rows.next() else {
    return Vec::new();
  };
  let headers: Vec<String> = header_row.iter().map(header_name).collect();

  rows
    .map(|row| {
      let mut mapping = FieldMapping::new();
      for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
          continue;
        }
        let value = row.get(idx).map_or(FieldValue::Null, cell_value);
        mapping.entry(name.clone()).or_insert(value);
      }
      mapping
    })
    .collect()
}

fn header_name(c: &Data) -> String {
  match c {
    Data::String(s) => s.clone(),
    Data::Empty => String::new(),
    other => other.to_string(),
  }
}

fn cell_value(c: &Data) -> FieldValue {
  match c {
    Data::Empty | Data::Error(_) => FieldValue::Null,
    Data::String(s) if s.is_empty() => FieldValue::Null,
    Data::String(s) => FieldValue::Text(s.clone()),
    Data::Int(i) => FieldValue::Integer(*i),
    Data::Float(f) => FieldValue::Float(*f),
    Data::Bool(b) => FieldValue::Bool(*b),
    Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
      Some(naive) => FieldValue::Text(naive.format(DATETIME_FORMAT).to_string()),
      None => FieldValue::Float(dt.as_f64()),
    },
    // Durations fall back to their serial value.
    Data::DateTime(dt) => FieldValue::Float(dt.as_f64()),
    Data::DateTimeIso(s) | Data::DurationIso(s) => FieldValue::Text(s.clone()),
  }
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn sheet_error(e: calamine::Error) -> Error { Error::MalformedSpreadsheet(e.to_string()) }
