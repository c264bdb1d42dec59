//! Encoding and decoding helpers between domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use insight_core::record::{Record, RecordDraft};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `records` row as read from SQLite, before timestamp decoding.
///
/// Columns must be selected in [`crate::schema::COLUMNS`] order.
pub struct RawRecord {
  pub id:         i64,
  pub fields:     RecordDraft,
  pub added_date: String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      fields:     RecordDraft {
        title:      row.get(1)?,
        topic:      row.get(2)?,
        sector:     row.get(3)?,
        region:     row.get(4)?,
        country:    row.get(5)?,
        source:     row.get(6)?,
        end_year:   row.get(7)?,
        intensity:  row.get(8)?,
        likelihood: row.get(9)?,
        relevance:  row.get(10)?,
        pest:       row.get(11)?,
        swot:       row.get(12)?,
        url:        row.get(13)?,
      },
      added_date: row.get(14)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    Ok(Record {
      id:         self.id,
      fields:     self.fields,
      added_date: decode_dt(&self.added_date)?,
    })
  }
}
