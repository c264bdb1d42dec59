//! JSON decoder.
//!
//! Supported inputs:
//! - a JSON array of objects: `[{"a":1}, {"a":2}]`
//! - a single object, treated as a one-element array
//! - newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Array elements that are not objects carry no fields and are skipped.

use insight_core::field::{FieldMapping, FieldValue};
use serde_json::Value;

use crate::{Error, Result};

/// Decode a JSON document (or NDJSON stream) into field mappings.
pub fn decode(input: &[u8]) -> Result<Vec<FieldMapping>> {
  let values = match serde_json::from_slice::<Value>(input) {
    Ok(Value::Array(items)) => items,
    Ok(other) => vec![other],
    // Not a single document; retry line by line, but report the original
    // error since that is what a plain JSON file would have hit.
    Err(e) => decode_lines(input).ok_or_else(|| Error::MalformedJson(e.to_string()))?,
  };

  let mut rows = Vec::with_capacity(values.len());
  for (index, value) in values.into_iter().enumerate() {
    match value {
      Value::Object(obj) => rows.push(
        obj
          .into_iter()
          .map(|(k, v)| (k, field_value(v)))
          .collect(),
      ),
      other => tracing::warn!(index, kind = kind_of(&other), "skipping non-object JSON element"),
    }
  }
  Ok(rows)
}

/// Parse NDJSON. `None` unless every non-blank line is a JSON value and there
/// is at least one.
fn decode_lines(input: &[u8]) -> Option<Vec<Value>> {
  let text = std::str::from_utf8(input).ok()?;
  let values = text
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .map(serde_json::from_str::<Value>)
    .collect::<Result<Vec<_>, _>>()
    .ok()?;
  (!values.is_empty()).then_some(values)
}

fn field_value(v: Value) -> FieldValue {
  match v {
    Value::Null => FieldValue::Null,
    Value::Bool(b) => FieldValue::Bool(b),
    Value::Number(n) => match n.as_i64() {
      Some(i) => FieldValue::Integer(i),
      None => n.as_f64().map_or(FieldValue::Null, FieldValue::Float),
    },
    Value::String(s) => FieldValue::Text(s),
    nested @ (Value::Array(_) | Value::Object(_)) => FieldValue::Text(nested.to_string()),
  }
}

fn kind_of(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn array_of_objects() {
    let rows = decode(br#"[{"title":"A","intensity":6},{"title":"B","end_year":""}]"#).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["title"], FieldValue::from("A"));
    assert_eq!(rows[0]["intensity"], FieldValue::Integer(6));
    assert_eq!(rows[1]["end_year"], FieldValue::from(""));
  }

  #[test]
  fn single_object_is_one_row() {
    let rows = decode(br#"{"topic":"gas","relevance":2.5,"flag":true,"x":null}"#).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["relevance"], FieldValue::Float(2.5));
    assert_eq!(rows[0]["flag"], FieldValue::Bool(true));
    assert_eq!(rows[0]["x"], FieldValue::Null);
  }

  #[test]
  fn ndjson_lines() {
    let rows = decode(b"{\"title\":\"A\"}\n\n{\"title\":\"B\"}\n").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["title"], FieldValue::from("B"));
  }

  #[test]
  fn nested_values_become_compact_json_text() {
    let rows = decode(br#"[{"url":["a","b"]}]"#).unwrap();
    assert_eq!(rows[0]["url"], FieldValue::from(r#"["a","b"]"#));
  }

  #[test]
  fn non_object_elements_are_skipped() {
    let rows = decode(br#"[1, "two", {"title":"three"}, null]"#).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], FieldValue::from("three"));
  }

  #[test]
  fn malformed_input_is_rejected() {
    assert!(matches!(decode(b"[{\"title\": "), Err(Error::MalformedJson(_))));
    assert!(matches!(decode(b""), Err(Error::MalformedJson(_))));
    assert!(matches!(decode(b"{\"a\":1}\nnot json\n"), Err(Error::MalformedJson(_))));
  }
}
