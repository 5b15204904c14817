//! Timestamp utilities

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Format used in backup snapshot names (second resolution)
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Get current local timestamp
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Render a timestamp for a snapshot file name, e.g. `2024-11-03-09-05-07`
pub fn snapshot_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(SNAPSHOT_TIMESTAMP_FORMAT).to_string()
}

/// Extract the calendar date from a publication date string
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (optionally
/// followed by a time part). Returns `None` when nothing parses.
pub fn parse_publication_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
