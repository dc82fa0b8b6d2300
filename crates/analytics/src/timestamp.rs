//! Order timestamp parsing
//!
//! The calendar day is taken in the timestamp's own offset. No timezone
//! conversion happens: `2023-05-01T23:30:00-02:00` belongs to May 1st.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats with an explicit offset (`+HH:MM`, `+HHMM`), tried after RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Formats without an offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 order timestamp down to its calendar date
///
/// Accepts RFC 3339 (`...Z`, `...+02:00`), compact offsets (`...+0200`),
/// naive date-times, and bare dates. Returns None for anything else.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.date_naive());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `YYYY-MM` month label for a date
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
