//! Timestamp canonicalization.
//!
//! The remote feed and the persisted sheet disagree on timestamp formats, so
//! both sides are pushed through [`normalize_iso`] before any comparison.
//! The function is total: blanks map to the empty string and unparseable
//! values pass through verbatim rather than erroring.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Naive date-time layouts accepted from either side, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, normalized to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Canonicalize a raw timestamp value into a comparable ISO-8601 string.
///
/// - `None` or blank/whitespace-only input → empty string.
/// - Parseable input → its ISO-8601 form. Offset timestamps keep their
///   offset (RFC 3339); naive ones render as `YYYY-MM-DDTHH:MM:SS`.
/// - Anything else → the input unchanged.
///
/// Idempotent: normalizing an already-normalized value is a no-op.
pub fn normalize_iso(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.to_rfc3339();
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return format_naive(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return format_naive(date.and_time(NaiveTime::MIN));
        }
    }

    raw.to_string()
}

fn format_naive(dt: NaiveDateTime) -> String {
    // Keep sub-second precision only when it carries information, so the
    // output re-parses to the same string.
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn none_maps_to_empty_string() {
        assert_eq!(normalize_iso(None), "");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_maps_to_empty_string(#[case] raw: &str) {
        assert_eq!(normalize_iso(Some(raw)), "");
    }

    #[rstest]
    #[case("2024-06-01T10:30:00Z", "2024-06-01T10:30:00+00:00")]
    #[case("2024-06-01T10:30:00-07:00", "2024-06-01T10:30:00-07:00")]
    #[case("2024-06-01T10:30:00", "2024-06-01T10:30:00")]
    #[case("2024-06-01 10:30:00", "2024-06-01T10:30:00")]
    #[case("2024-06-01T10:30:00.125", "2024-06-01T10:30:00.125")]
    #[case("2024-06-01", "2024-06-01T00:00:00")]
    #[case("06/01/2024", "2024-06-01T00:00:00")]
    #[case("06/01/2024 10:30", "2024-06-01T10:30:00")]
    #[case("06/01/2024 10:30:45", "2024-06-01T10:30:45")]
    fn parseable_input_canonicalizes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_iso(Some(raw)), expected);
    }

    #[rstest]
    #[case("not a date")]
    #[case("Updated recently")]
    #[case("2024-13-45")]
    fn unparseable_input_passes_through(#[case] raw: &str) {
        assert_eq!(normalize_iso(Some(raw)), raw);
    }

    #[rstest]
    #[case("2024-06-01T10:30:00Z")]
    #[case("2024-06-01T10:30:00+05:30")]
    #[case("2024-06-01 10:30:00")]
    #[case("2024-06-01T10:30:00.125")]
    #[case("2024-06-01")]
    #[case("garbage value")]
    #[case("")]
    fn normalization_is_idempotent(#[case] raw: &str) {
        let once = normalize_iso(Some(raw));
        let twice = normalize_iso(Some(&once));
        assert_eq!(twice, once);
    }

    #[test]
    fn surrounding_whitespace_is_ignored_for_parsing() {
        assert_eq!(normalize_iso(Some("  2024-06-01  ")), "2024-06-01T00:00:00");
    }
}
