//! Date normalization for date range bounds.
//!
//! Accepts timestamps, epoch seconds and a handful of common textual forms, and formats
//! them as ISO-8601 with a numeric offset (`2024-01-15T00:00:00+0000`). Inputs without a
//! zone are taken as UTC.
//!
//! Parsing never reads the clock. Relative words (`now`, `today`, ...) are resolved
//! separately by [`resolve_relative`], once, when a bound is stored.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Output format for date bounds.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Zoned formats tried in order after RFC 3339 and RFC 2822.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
];

/// Zoneless date-time formats, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Zoneless date formats, interpreted as UTC midnight.
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

/// Parses a date expression into a timestamp.
///
/// Understands RFC 3339, RFC 2822, ISO-8601 with or without an offset, plain dates and
/// `@<epoch seconds>`. Returns `None` for anything else, including relative words.
pub fn parse_date(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(epoch) = input.strip_prefix('@') {
        return epoch.trim().parse::<i64>().ok().and_then(from_epoch);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt);
    }
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(utc(naive));
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return date.and_hms_opt(0, 0, 0).map(utc);
        }
    }

    None
}

/// Converts epoch seconds into a UTC timestamp.
pub fn from_epoch(seconds: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.fixed_offset())
}

/// Formats a timestamp as ISO-8601 with a numeric offset.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format(ISO8601_FORMAT).to_string()
}

/// Resolves `now`, `today`, `yesterday` or `tomorrow` against the current UTC clock.
pub fn resolve_relative(input: &str) -> Option<DateTime<FixedOffset>> {
    relative_to(input, Utc::now())
}

/// Resolves a relative day word against `now`.
fn relative_to(input: &str, now: DateTime<Utc>) -> Option<DateTime<FixedOffset>> {
    let midnight = utc(now.date_naive().and_hms_opt(0, 0, 0)?);
    match input.trim().to_ascii_lowercase().as_str() {
        "now" => Some(now.fixed_offset()),
        "today" => Some(midnight),
        "yesterday" => Some(midnight - Duration::days(1)),
        "tomorrow" => Some(midnight + Duration::days(1)),
        _ => None,
    }
}

/// Pins a zoneless date-time to UTC.
fn utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}
