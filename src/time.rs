//! Timestamp parsing for sort keys.
//!
//! Catalog records carry their timestamps as raw strings straight from
//! storage. Ordering needs a single number per record, so everything here
//! normalizes to epoch milliseconds and maps anything unparseable to
//! [`EPOCH_ZERO`] instead of failing.
//!
//! Accepted shapes, tried in order:
//! - RFC 3339 (`2024-01-01T09:30:00Z`, `2024-01-01T09:30:00.250+02:00`)
//! - naive date-time, read as UTC (`2024-01-01T09:30:00`, `2024-01-01 09:30:00`)
//! - bare date, read as UTC midnight (`2024-01-01`)
//! - integer or float epoch milliseconds (`1704067200000`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::trace;

/// Sentinel for absent or malformed timestamps.
///
/// Sorts last under `newest` and first under `oldest`.
pub const EPOCH_ZERO: i64 = 0;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a raw timestamp string.
///
/// Returns `None` for blank or unrecognized input.
///
/// # Examples
///
/// ```
/// use wardrobe::time::parse_timestamp;
///
/// let at = parse_timestamp("2024-01-01").unwrap();
/// assert_eq!(at.timestamp_millis(), 1_704_067_200_000);
/// assert!(parse_timestamp("not a date").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    parse_epoch_number(raw).and_then(DateTime::from_timestamp_millis)
}

fn parse_epoch_number(raw: &str) -> Option<i64> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Some(millis);
    }
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value.abs() > i64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(value.trunc() as i64)
}

/// Converts an optional raw timestamp into epoch milliseconds.
///
/// Absent and malformed values yield [`EPOCH_ZERO`]; this never panics.
#[must_use]
pub fn epoch_millis(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return EPOCH_ZERO;
    };
    match parse_timestamp(raw) {
        Some(at) => at.timestamp_millis(),
        None => {
            trace!(raw, "unparseable timestamp, defaulting to epoch zero");
            EPOCH_ZERO
        }
    }
}

/// Like [`epoch_millis`], but distinguishes "absent or malformed" from a
/// real value so callers can fall back to another source.
#[must_use]
pub fn try_epoch_millis(raw: Option<&str>) -> Option<i64> {
    raw.and_then(parse_timestamp).map(|at| at.timestamp_millis())
}
