//! Timestamps for location fixes.
//!
//! Fixes are stamped with server time and stored as RFC 3339 text with
//! millisecond precision, the same shape clients see in JSON.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp recorded with every location fix.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to whole milliseconds so that a
/// stored fix reads back equal to the one that was written.
#[must_use]
pub fn now() -> Timestamp {
    let ts = Utc::now();
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// Render a timestamp as RFC 3339 (`2024-05-01T12:00:00.000Z`).
#[must_use]
pub fn to_rfc3339(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `value` is not valid RFC 3339.
pub fn parse_rfc3339(value: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|ts| ts.to_utc())
}
