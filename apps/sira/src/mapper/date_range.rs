//! Date ranges are stored by the backend as a single `"start - end"` string.

pub const DATE_RANGE_SEPARATOR: &str = " - ";

/// Splits a stored range into `(start, end)`.
///
/// Only the exact `" - "` separator is recognised. A missing range, or one
/// without the separator, yields two empty strings.
pub fn split_date_range(range: Option<&str>) -> (String, String) {
    match range.and_then(|r| r.split_once(DATE_RANGE_SEPARATOR)) {
        Some((start, end)) => (start.to_string(), end.to_string()),
        None => (String::new(), String::new()),
    }
}

pub fn join_date_range(start: &str, end: &str) -> String {
    format!("{start}{DATE_RANGE_SEPARATOR}{end}")
}
