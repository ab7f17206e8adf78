//! Timestamp parsing for record fields.
//!
//! Naive date-times carry no offset and are read as wall-clock time in the
//! engine's configured zone. Values that cannot be placed on the timeline
//! yield `None`; callers treat that as "no timestamp".

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex_lite::Regex;

use crate::value::FieldValue;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Leading `YYYY-MM-DD`, or `DD/MM/YYYY` / `DD-MM-YYYY`.
static DATE_LIKE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4}-\d{2}-\d{2}|\d{1,2}[/-]\d{1,2}[/-]\d{4})")
        .inspect_err(|e| tracing::error!(error = %e, "Invalid date-like pattern"))
        .ok()
});

/// ## Summary
/// Heuristic check for strings that look like a date.
///
/// Only used to pick a comparison strategy when sorting free-form fields.
/// A string like `"2024-13-45 notes"` passes the check but fails to parse;
/// the comparator then falls through to text comparison.
#[must_use]
pub fn is_date_like(text: &str) -> bool {
    DATE_LIKE.as_ref().is_some_and(|re| re.is_match(text))
}

/// ## Summary
/// Places a wall-clock date-time in `tz`.
///
/// During a DST fold the earlier instant wins. Times inside a DST gap do not
/// exist and yield `None`.
#[must_use]
pub fn localize(naive: &NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// ## Summary
/// Parses a timestamp string.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`, and bare dates
/// in `YYYY-MM-DD`, `DD/MM/YYYY` or `DD-MM-YYYY` form (read as local midnight).
#[must_use]
pub fn parse_text(text: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return localize(&naive, tz);
    }

    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| localize(&naive, tz))
}

/// ## Summary
/// Reads a record field as a timestamp.
///
/// Numbers are epoch milliseconds. Text goes through [`parse_text`].
#[must_use]
pub fn parse_value(value: &FieldValue, tz: Tz) -> Option<DateTime<Utc>> {
    match value {
        FieldValue::Date(dt) => Some(*dt),
        FieldValue::Text(text) => parse_text(text, tz),
        FieldValue::Number(millis) if millis.is_finite() => {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Sub-millisecond precision is not meaningful for record timestamps"
            )]
            let millis = millis.trunc() as i64;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

/// ## Summary
/// Reads a value as a date for sort comparison.
///
/// Unlike [`parse_value`], numbers are never dates here and text must pass
/// the [`is_date_like`] check first.
#[must_use]
pub fn sort_date(value: &FieldValue, tz: Tz) -> Option<DateTime<Utc>> {
    match value {
        FieldValue::Date(dt) => Some(*dt),
        FieldValue::Text(text) if is_date_like(text) => parse_text(text, tz),
        _ => None,
    }
}
