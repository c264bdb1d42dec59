//! Record normalizer: maps an arbitrary [`FieldMapping`] onto the fixed
//! record schema.
//!
//! Normalization never fails. Missing keys, wrong types and extra fields all
//! produce a best-effort [`RecordDraft`]:
//!
//! - keys are matched case-sensitively and exactly;
//! - text columns take the textual form of any scalar;
//! - integer columns (`intensity`, `likelihood`, `relevance`) take integers,
//!   integral floats and numeric text; any other value becomes `None`
//!   rather than an error;
//! - `end_year` is always stored as text (`2025` becomes `"2025"`);
//! - fields without a schema column are dropped.

use crate::{
  field::{FieldMapping, FieldValue},
  record::RecordDraft,
};

/// Normalize one decoded row into a draft record.
pub fn normalize(mapping: &FieldMapping) -> RecordDraft {
  let text = |key: &str| mapping.get(key).and_then(FieldValue::to_text);
  let integer = |key: &str| mapping.get(key).and_then(FieldValue::to_integer);

  RecordDraft {
    title:      text("title"),
    topic:      text("topic"),
    sector:     text("sector"),
    region:     text("region"),
    country:    text("country"),
    source:     text("source"),
    end_year:   text("end_year"),
    intensity:  integer("intensity"),
    likelihood: integer("likelihood"),
    relevance:  integer("relevance"),
    pest:       text("pest"),
    swot:       text("swot"),
    url:        text("url"),
  }
}
