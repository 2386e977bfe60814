//! Philippine national holidays for the calendar grid.
//!
//! Fixed-date holidays plus National Heroes Day (last Monday of August).
//! Holidays are rendered view-only; this table is a display aid, not an
//! authoritative civil calendar.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: &'static str,
}

/// National Heroes Day: last Monday of August.
fn last_monday_of_august(year: i32) -> NaiveDate {
    let mut d = NaiveDate::from_ymd_opt(year, 8, 31).expect("Aug 31 always exists");
    while d.weekday() != Weekday::Mon {
        d -= Duration::days(1);
    }
    d
}

/// All holidays of one year, in calendar order.
pub fn holidays_for_year(year: i32) -> Vec<Holiday> {
    let fixed = |m: u32, d: u32, name: &'static str| Holiday {
        date: NaiveDate::from_ymd_opt(year, m, d).expect("fixed holiday date"),
        name,
    };
    vec![
        fixed(1, 1, "New Year's Day"),
        fixed(4, 9, "Araw ng Kagitingan"),
        fixed(5, 1, "Labor Day"),
        fixed(6, 12, "Independence Day"),
        Holiday {
            date: last_monday_of_august(year),
            name: "National Heroes Day",
        },
        fixed(11, 30, "Bonifacio Day"),
        fixed(12, 25, "Christmas Day"),
        fixed(12, 30, "Rizal Day"),
    ]
}

/// Holidays within an inclusive date range.
pub fn holidays_in_range(start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
    if end < start {
        return Vec::new();
    }
    (start.year()..=end.year())
        .flat_map(holidays_for_year)
        .filter(|h| h.date >= start && h.date <= end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_heroes_day_is_last_monday_of_august() {
        // 2025-08-25 is the last Monday of August 2025.
        assert_eq!(
            last_monday_of_august(2025),
            NaiveDate::from_ymd_opt(2025, 8, 25).unwrap()
        );
        // 2026-08-31 itself is a Monday.
        assert_eq!(
            last_monday_of_august(2026),
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
        );
    }

    #[test]
    fn year_has_eight_holidays() {
        assert_eq!(holidays_for_year(2025).len(), 8);
    }

    #[test]
    fn range_filter_is_inclusive_and_spans_years() {
        let start = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let names: Vec<_> = holidays_in_range(start, end)
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["Christmas Day", "Rizal Day", "New Year's Day"]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(holidays_in_range(start, end).is_empty());
    }
}
