//! SQL schema for the insight SQLite store.
//!
//! Executed at connection startup and by `ensure_schema`. There is no
//! migration system; the DDL only ever creates what is missing.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per ingested insight. Rows are never updated in place.
CREATE TABLE IF NOT EXISTS records (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT,
    topic       TEXT,
    sector      TEXT,
    region      TEXT,
    country     TEXT,
    source      TEXT,
    end_year    TEXT,            -- always text, even for numeric years
    intensity   INTEGER,
    likelihood  INTEGER,
    relevance   INTEGER,
    pest        TEXT,
    swot        TEXT,
    url         TEXT,
    added_date  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS records_topic_idx   ON records(topic);
CREATE INDEX IF NOT EXISTS records_country_idx ON records(country);
CREATE INDEX IF NOT EXISTS records_sector_idx  ON records(sector);
";

/// Column list shared by inserts and selects, in declaration order.
pub const COLUMNS: &str = "id, title, topic, sector, region, country, source, end_year,
  intensity, likelihood, relevance, pest, swot, url, added_date";
