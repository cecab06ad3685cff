// Value coercion helpers
// Author: Gabriel Demetrios Lafis

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::data::Value;

/// Date-time layouts tried in order before falling back to date-only layouts
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, month-first for slashed dates
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Coerce a value to a finite float.
///
/// Numbers pass through. Strings are trimmed and must parse in full, so
/// `"12abc"` and `"2024-01-15"` are not numbers. Booleans and nulls never are.
pub fn try_parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Bool(_) => None,
    };

    parsed.filter(|f| f.is_finite())
}

/// Parse a string value as a calendar date or date-time.
///
/// Accepts RFC 3339 timestamps (normalized to UTC) and the fixed layouts in
/// `DATETIME_FORMATS` and `DATE_FORMATS`. Non-string values are never dates.
pub fn try_parse_date(value: &Value) -> Option<NaiveDateTime> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}
