//! Per-type formatting of scalar leaf values.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Bare UTC timestamps as the event API emits them
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").expect("timestamp pattern is valid")
});

/// Fixed date-time format used everywhere a timestamp is prettified.
/// Machine-independent on purpose; output stays in UTC.
const DATETIME_FORMAT: &str = "%a %b %d %H:%M";

/// Date-only format for event date ranges.
const DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Render a scalar leaf as display text.
///
/// Strings that are ISO-8601 UTC timestamps are reformatted with
/// [`DATETIME_FORMAT`]; other strings pass through without quotes. Null
/// renders empty (a blank cell, not the word "null"). Containers fall back
/// to compact JSON; the list/table renderers recurse before reaching that
/// case.
pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => match parse_timestamp(s) {
            Some(dt) => dt.format(DATETIME_FORMAT).to_string(),
            None => s.clone(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Raw stringification used by the HTML table path: no timestamp
/// prettifying, strings unquoted, null empty.
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if !TIMESTAMP.is_match(s) {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format an event date range, collapsing same-day ranges to one date.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format(DATE_FORMAT).to_string()
    } else {
        format!(
            "{} - {}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        )
    }
}
