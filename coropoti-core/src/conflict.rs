//! Conflict display reducer.
//!
//! Conflicts are computed server-side and arrive as directed pairs, so the
//! same clash shows up twice ((A,B) and (B,A)). The reducer collapses the
//! symmetric pairs and hides rows where either side has already finished.
//! Pure filtering, no network; views re-run it on every clock tick.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::datetime::{combine, time_to_minutes};

/// One side-pair from `GET /events/conflicts/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictRow {
    #[serde(default)]
    pub conflict_id: Option<i64>,
    pub event_id: i64,
    pub event_title: String,
    pub event_date: String,
    pub event_start: String,
    pub event_end: String,
    pub conflicting_event_id: i64,
    pub conflicting_title: String,
    pub conflicting_date: String,
    pub conflicting_start: String,
    pub conflicting_end: String,
    #[serde(default, deserialize_with = "flag_from_int")]
    pub time_conflict: bool,
    #[serde(default, deserialize_with = "flag_from_int")]
    pub participant_conflict: bool,
}

/// The backend serializes these flags as 0/1 integers.
fn flag_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

fn side_done(ymd: &str, end_time: &str, now: NaiveDateTime) -> bool {
    match combine(ymd, end_time) {
        Some(end) => now >= end,
        None => false,
    }
}

/// Collapse symmetric pairs and drop rows where either event is done.
///
/// The canonical key is the sorted id pair, so (1,2) and (2,1) reduce to
/// whichever row came first.
pub fn reduce_conflicts(rows: &[ConflictRow], now: NaiveDateTime) -> Vec<ConflictRow> {
    let mut seen = std::collections::HashSet::new();
    rows.iter()
        .filter(|row| {
            !side_done(&row.event_date, &row.event_end, now)
                && !side_done(&row.conflicting_date, &row.conflicting_end, now)
        })
        .filter(|row| {
            let key = if row.event_id <= row.conflicting_event_id {
                (row.event_id, row.conflicting_event_id)
            } else {
                (row.conflicting_event_id, row.event_id)
            };
            seen.insert(key)
        })
        .cloned()
        .collect()
}

/// Overlapping sub-range between two same-day time intervals, as
/// minute-of-day bounds. `None` when the intervals merely touch or miss.
pub fn overlap_minutes(
    start_a: &str,
    end_a: &str,
    start_b: &str,
    end_b: &str,
) -> Option<(i32, i32)> {
    let start = time_to_minutes(start_a).max(time_to_minutes(start_b));
    let end = time_to_minutes(end_a).min(time_to_minutes(end_b));
    (start < end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ymd: &str, hm: &str) -> NaiveDateTime {
        combine(ymd, hm).expect("valid test instant")
    }

    fn row(a: i64, b: i64) -> ConflictRow {
        ConflictRow {
            conflict_id: None,
            event_id: a,
            event_title: format!("Event {a}"),
            event_date: "2025-06-10".into(),
            event_start: "09:00:00".into(),
            event_end: "10:00:00".into(),
            conflicting_event_id: b,
            conflicting_title: format!("Event {b}"),
            conflicting_date: "2025-06-10".into(),
            conflicting_start: "09:30:00".into(),
            conflicting_end: "11:00:00".into(),
            time_conflict: true,
            participant_conflict: false,
        }
    }

    #[test]
    fn symmetric_pairs_collapse_to_one() {
        let now = at("2025-06-10", "08:00");
        let reduced = reduce_conflicts(&[row(1, 2), row(2, 1)], now);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].event_id, 1);
    }

    #[test]
    fn done_pairs_are_suppressed() {
        // First event ends 10:00; at 10:05 the pair disappears.
        let reduced = reduce_conflicts(&[row(1, 2)], at("2025-06-10", "10:05"));
        assert!(reduced.is_empty());
    }

    #[test]
    fn live_pairs_survive() {
        let reduced = reduce_conflicts(&[row(1, 2)], at("2025-06-10", "09:45"));
        assert_eq!(reduced.len(), 1);
    }

    #[test]
    fn unparseable_end_is_not_done() {
        let mut r = row(1, 2);
        r.event_end = "junk".into();
        let reduced = reduce_conflicts(&[r], at("2025-06-11", "00:00"));
        // Other side ended 2025-06-10 11:00, so the pair is still dropped.
        assert!(reduced.is_empty());
    }

    #[test]
    fn overlap_of_partial_intervals() {
        assert_eq!(
            overlap_minutes("09:00", "10:00", "09:30", "11:00"),
            Some((570, 600))
        );
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert_eq!(overlap_minutes("09:00", "10:00", "10:00", "11:00"), None);
        assert_eq!(overlap_minutes("09:00", "10:00", "11:00", "12:00"), None);
    }

    #[test]
    fn flags_deserialize_from_ints() {
        let json = r#"{
            "event_id": 1, "event_title": "A", "event_date": "2025-06-10",
            "event_start": "09:00:00", "event_end": "10:00:00",
            "conflicting_event_id": 2, "conflicting_title": "B",
            "conflicting_date": "2025-06-10", "conflicting_start": "09:30:00",
            "conflicting_end": "11:00:00",
            "time_conflict": 1, "participant_conflict": 0
        }"#;
        let row: ConflictRow = serde_json::from_str(json).expect("deserialize");
        assert!(row.time_conflict);
        assert!(!row.participant_conflict);
    }
}
