//! Date/time helpers for the wire formats the backend uses.
//!
//! Dates travel as `YYYY-MM-DD` (sometimes with a trailing time component
//! from the database driver) and times as `HH:MM` or `HH:MM:SS`. Everything
//! here normalizes those strings or converts them into `chrono` naive types;
//! the backend stores local wall-clock values, so no timezone math happens.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{CoropotiError, CoropotiResult};

/// Strip a date string down to its `YYYY-MM-DD` prefix.
/// Handles `2025-06-10T00:00:00.000Z` style values the API sometimes returns.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 10 {
        trimmed[..10].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize `HH:MM` to `HH:MM:SS`; `HH:MM:SS` passes through.
pub fn normalize_time(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() == 5 {
        format!("{trimmed}:00")
    } else {
        trimmed.to_string()
    }
}

/// Parse a `YYYY-MM-DD` string (longer strings are truncated first).
pub fn parse_ymd(raw: &str) -> CoropotiResult<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_date(raw), "%Y-%m-%d")
        .map_err(|_| CoropotiError::InvalidDate(raw.to_string()))
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_hms(raw: &str) -> CoropotiResult<NaiveTime> {
    NaiveTime::parse_from_str(&normalize_time(raw), "%H:%M:%S")
        .map_err(|_| CoropotiError::InvalidTime(raw.to_string()))
}

/// Combine a date string and a time string into a local instant.
/// Returns None instead of erroring so status derivation can fail open.
pub fn combine(date: &str, time: &str) -> Option<NaiveDateTime> {
    let d = parse_ymd(date).ok()?;
    let t = parse_hms(time).ok()?;
    Some(d.and_time(t))
}

/// Saturday/Sunday test on a `YYYY-MM-DD` string.
/// Unparseable input is treated as a weekday so the caller's own date
/// validation produces the error message, not the weekend lock.
pub fn is_weekend(ymd: &str) -> bool {
    match parse_ymd(ymd) {
        Ok(d) => matches!(d.weekday(), Weekday::Sat | Weekday::Sun),
        Err(_) => false,
    }
}

/// Every date in the inclusive range, as `YYYY-MM-DD` strings.
/// Empty when either bound is invalid or end < start.
pub fn date_range_ymd(start: &str, end: &str) -> Vec<String> {
    let (Ok(start), Ok(end)) = (parse_ymd(start), parse_ymd(end)) else {
        return Vec::new();
    };
    if end < start {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut cur = start;
    while cur <= end {
        out.push(cur.format("%Y-%m-%d").to_string());
        cur += Duration::days(1);
    }
    out
}

/// Minute-of-day for interval intersection (`09:30` -> 570).
/// Seconds are ignored; malformed input counts as midnight.
pub fn time_to_minutes(time: &str) -> i32 {
    let mut parts = time.trim().split(':');
    let h: i32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let m: i32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    h * 60 + m
}

/// Minute-of-day back to `HH:MM`.
pub fn minutes_to_time(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// 12-hour display form, e.g. `09:00:00` -> `9:00 AM`.
pub fn format_time_short(time: &str) -> String {
    let hhmm = normalize_time(time);
    let mut parts = hhmm.split(':');
    let Some(h) = parts.next().and_then(|p| p.parse::<u32>().ok()) else {
        return hhmm;
    };
    let m = parts.next().unwrap_or("00");
    let hour12 = if h % 12 == 0 { 12 } else { h % 12 };
    let suffix = if h < 12 { "AM" } else { "PM" };
    format!("{hour12}:{m} {suffix}")
}

/// Friendly date label, e.g. `2025-06-10` -> `Tue Jun 10 2025`.
pub fn format_date_label(ymd: &str) -> String {
    match parse_ymd(ymd) {
        Ok(d) => d.format("%a %b %-d %Y").to_string(),
        Err(_) => ymd.to_string(),
    }
}

/// Display form for a date span; single-day spans collapse to one label.
pub fn format_date_range(start: &str, end: &str) -> String {
    let start = normalize_date(start);
    let end = normalize_date(end);
    if end.is_empty() || end == start {
        format_date_label(&start)
    } else {
        format!("{} - {}", format_date_label(&start), format_date_label(&end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_date_strips_time_component() {
        assert_eq!(normalize_date("2025-06-10T00:00:00.000Z"), "2025-06-10");
        assert_eq!(normalize_date("2025-06-10"), "2025-06-10");
    }

    #[test]
    fn normalize_time_appends_seconds() {
        assert_eq!(normalize_time("09:00"), "09:00:00");
        assert_eq!(normalize_time("09:00:30"), "09:00:30");
    }

    #[test]
    fn weekend_detection() {
        // 2025-06-14 is a Saturday, 2025-06-15 a Sunday
        assert!(is_weekend("2025-06-14"));
        assert!(is_weekend("2025-06-15"));
        assert!(!is_weekend("2025-06-13"));
        assert!(!is_weekend("not-a-date"));
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = date_range_ymd("2025-06-09", "2025-06-11");
        assert_eq!(range, vec!["2025-06-09", "2025-06-10", "2025-06-11"]);
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        assert!(date_range_ymd("2025-06-11", "2025-06-09").is_empty());
        assert!(date_range_ymd("garbage", "2025-06-09").is_empty());
    }

    #[test]
    fn minute_of_day_roundtrip() {
        assert_eq!(time_to_minutes("09:30"), 570);
        assert_eq!(time_to_minutes("09:30:45"), 570);
        assert_eq!(minutes_to_time(570), "09:30");
    }

    #[test]
    fn twelve_hour_formatting() {
        assert_eq!(format_time_short("09:00:00"), "9:00 AM");
        assert_eq!(format_time_short("12:15"), "12:15 PM");
        assert_eq!(format_time_short("00:05"), "12:05 AM");
        assert_eq!(format_time_short("13:30"), "1:30 PM");
    }

    #[test]
    fn combine_fails_open_on_bad_input() {
        assert!(combine("2025-06-10", "09:00").is_some());
        assert!(combine("junk", "09:00").is_none());
        assert!(combine("2025-06-10", "junk").is_none());
    }
}
