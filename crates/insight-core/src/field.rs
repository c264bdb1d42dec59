//! Loosely-typed field values produced by the format decoders.
//!
//! A [`FieldMapping`] is one input row or object before it has been mapped
//! onto the fixed record schema. Values stay untyped here; they are resolved
//! to schema types only by [`crate::normalize`].

use std::collections::BTreeMap;

/// One row or object from an upload, keyed by its original field names.
pub type FieldMapping = BTreeMap<String, FieldValue>;

/// A single decoded cell or JSON scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
  /// Absent, empty or explicit `null`.
  Null,
  Text(String),
  Integer(i64),
  Float(f64),
  Bool(bool),
}

impl FieldValue {
  pub fn is_null(&self) -> bool { matches!(self, FieldValue::Null) }

  /// Textual form of the value, or `None` for null and empty text.
  ///
  /// Integral floats print without a fractional part (`2025.0` → `"2025"`).
  /// Non-finite floats have no textual form. Booleans print capitalised
  /// (`"True"`, `"False"`).
  pub fn to_text(&self) -> Option<String> {
    match self {
      FieldValue::Null => None,
      FieldValue::Text(s) if s.is_empty() => None,
      FieldValue::Text(s) => Some(s.clone()),
      FieldValue::Integer(i) => Some(i.to_string()),
      FieldValue::Float(f) if f.is_finite() => Some(f.to_string()),
      FieldValue::Float(_) => None,
      FieldValue::Bool(true) => Some("True".to_string()),
      FieldValue::Bool(false) => Some("False".to_string()),
    }
  }

  /// Integer form of the value, or `None` when it has no exact one.
  ///
  /// Integral floats convert exactly and numeric text is parsed after
  /// trimming. Fractional numbers, booleans and other text yield `None`.
  pub fn to_integer(&self) -> Option<i64> {
    match self {
      FieldValue::Integer(i) => Some(*i),
      FieldValue::Float(f) => float_to_integer(*f),
      FieldValue::Text(s) => {
        let s = s.trim();
        s.parse::<i64>()
          .ok()
          .or_else(|| s.parse::<f64>().ok().and_then(float_to_integer))
      }
      FieldValue::Null | FieldValue::Bool(_) => None,
    }
  }
}

fn float_to_integer(f: f64) -> Option<i64> {
  // i64::MAX is not representable as f64; the bound is exclusive.
  let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
  (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self { FieldValue::Text(s.to_owned()) }
}
