//! Comma-separated text decoder.
//!
//! Rules:
//!
//! - the first row is the header and names the fields;
//! - quoted fields may contain delimiters and newlines;
//! - empty cells are absent, cells that parse as numbers are numeric, and
//!   everything else is text;
//! - short rows are padded with absent values, long rows are an error;
//! - empty lines are skipped, but a line of bare delimiters (`,,`) is a row
//!   of absent values.

use insight_core::field::{FieldMapping, FieldValue};

use crate::{Error, Result};

/// Decode CSV bytes into field mappings keyed by header names.
pub fn decode(input: &[u8]) -> Result<Vec<FieldMapping>> {
  let mut rdr = csv::ReaderBuilder::new()
    .has_headers(true)
    .flexible(true)
    .from_reader(input);

  let headers = rdr.headers().map_err(table_error)?.clone();
  if headers.is_empty() {
    return Err(Error::MalformedTable("input has no header row".to_string()));
  }

  let mut rows = Vec::new();
  for result in rdr.records() {
    let record = result.map_err(table_error)?;
    if record.len() > headers.len() {
      let line = record.position().map_or(0, |p| p.line());
      return Err(Error::MalformedTable(format!(
        "line {line} has {} fields, header has {}",
        record.len(),
        headers.len()
      )));
    }

    let mut mapping = FieldMapping::new();
    for (idx, name) in headers.iter().enumerate() {
      let value = record.get(idx).map_or(FieldValue::Null, infer_cell);
      // First column wins when a header name repeats.
      mapping.entry(name.to_owned()).or_insert(value);
    }
    rows.push(mapping);
  }

  Ok(rows)
}

fn infer_cell(raw: &str) -> FieldValue {
  if raw.is_empty() {
    return FieldValue::Null;
  }
  let trimmed = raw.trim();
  if let Ok(i) = trimmed.parse::<i64>() {
    return FieldValue::Integer(i);
  }
  match trimmed.parse::<f64>() {
    Ok(f) if f.is_finite() => FieldValue::Float(f),
    _ => FieldValue::Text(raw.to_owned()),
  }
}

fn table_error(e: csv::Error) -> Error { Error::MalformedTable(e.to_string()) }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quoted_delimiter_and_numeric_inference() {
    let rows = decode(b"title,topic,intensity\n\"A,B\",x,5\n").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], FieldValue::from("A,B"));
    assert_eq!(rows[0]["topic"], FieldValue::from("x"));
    assert_eq!(rows[0]["intensity"], FieldValue::Integer(5));
  }

  #[test]
  fn embedded_newline_inside_quotes() {
    let rows = decode(b"title,topic\n\"line one\nline two\",oil\n").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], FieldValue::from("line one\nline two"));
  }

  #[test]
  fn empty_cells_are_absent_and_floats_are_numeric() {
    let rows = decode(b"title,relevance,end_year\n,2.5,2030\n").unwrap();
    assert_eq!(rows[0]["title"], FieldValue::Null);
    assert_eq!(rows[0]["relevance"], FieldValue::Float(2.5));
    assert_eq!(rows[0]["end_year"], FieldValue::Integer(2030));
  }

  #[test]
  fn short_rows_are_padded() {
    let rows = decode(b"title,topic,sector\nA\nB,gas\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["topic"], FieldValue::Null);
    assert_eq!(rows[0]["sector"], FieldValue::Null);
    assert_eq!(rows[1]["topic"], FieldValue::from("gas"));
  }

  #[test]
  fn long_rows_are_rejected() {
    let err = decode(b"title,topic\nA,B,C\n").unwrap_err();
    assert!(matches!(err, Error::MalformedTable(_)));
  }

  #[test]
  fn empty_lines_are_skipped_but_delimiter_only_rows_are_kept() {
    let rows = decode(b"title,topic\nA,B\n\n,\nC,D\n").unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].values().all(FieldValue::is_null));
    assert_eq!(rows[2]["title"], FieldValue::from("C"));
  }

  #[test]
  fn header_only_yields_no_rows() {
    assert!(decode(b"title,topic\n").unwrap().is_empty());
  }

  #[test]
  fn empty_input_is_rejected() {
    assert!(matches!(decode(b""), Err(Error::MalformedTable(_))));
  }

  #[test]
  fn invalid_utf8_is_rejected() {
    assert!(matches!(
      decode(b"title\n\xff\xfe\n"),
      Err(Error::MalformedTable(_))
    ));
  }
}
