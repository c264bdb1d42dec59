//! The stored record and its pre-insertion draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every business field of a record. `id` and `added_date` are assigned by
/// the store and never come from input.
///
/// `end_year` is always text, even when the source value was numeric, so
/// that values like `"2025"` and ranges like `"2025-2030"` share one column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
  pub title:      Option<String>,
  pub topic:      Option<String>,
  pub sector:     Option<String>,
  pub region:     Option<String>,
  pub country:    Option<String>,
  pub source:     Option<String>,
  pub end_year:   Option<String>,
  pub intensity:  Option<i64>,
  pub likelihood: Option<i64>,
  pub relevance:  Option<i64>,
  pub pest:       Option<String>,
  pub swot:       Option<String>,
  pub url:        Option<String>,
}

/// A persisted record.
///
/// Serialises flat: `id`, then every draft field, then `added_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  pub id:         i64,
  #[serde(flatten)]
  pub fields:     RecordDraft,
  pub added_date: DateTime<Utc>,
}
