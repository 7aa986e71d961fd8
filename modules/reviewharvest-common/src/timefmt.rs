//! Timestamp formatting for crawl records.
//!
//! Crawl times are wall-clock strings (`YYYY-MM-DD HH:MM:SS`, UTC) plus a
//! Unix-epoch integer. Vendor timestamps arrive as RFC 3339 UTC strings and
//! are re-formatted the same way.

use chrono::{DateTime, Utc};
use thiserror::Error;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
#[error("Invalid UTC timestamp {0:?}: {1}")]
pub struct TimestampError(String, chrono::ParseError);

/// Current wall-clock time, formatted.
pub fn now() -> String {
    Utc::now().format(FORMAT).to_string()
}

/// Current time as Unix epoch seconds.
pub fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Re-format a vendor RFC 3339 UTC string (e.g. `2023-09-18T07:00:00Z`).
pub fn utc(s: &str) -> Result<String, TimestampError> {
    Ok(parse(s)?.format(FORMAT).to_string())
}

/// Vendor RFC 3339 UTC string as Unix epoch seconds.
pub fn utc_epoch(s: &str) -> Result<i64, TimestampError> {
    Ok(parse(s)?.timestamp())
}

fn parse(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TimestampError(s.to_string(), e))
}
