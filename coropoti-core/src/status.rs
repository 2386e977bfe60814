//! Derived event status.
//!
//! The backend only stores `active`/`cancelled`; everything else is a pure
//! function of the event's date/time fields and the current instant, so it
//! is recomputed on every render (the CLI's watch mode re-evaluates it on a
//! 60-second tick) and never cached across time progression.

use chrono::NaiveDateTime;

use crate::datetime::combine;
use crate::event::{Event, StoredStatus};

/// Clock-derived status. Ordering of checks: cancelled > done > ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedStatus {
    Active,
    Ongoing,
    Done,
    Cancelled,
}

impl DerivedStatus {
    pub fn label(self) -> &'static str {
        match self {
            DerivedStatus::Active => "Active",
            DerivedStatus::Ongoing => "Ongoing",
            DerivedStatus::Done => "Done",
            DerivedStatus::Cancelled => "Cancelled",
        }
    }
}

/// Event start as a local instant, when the fields parse.
pub fn start_at(event: &Event) -> Option<NaiveDateTime> {
    combine(&event.date_ymd(), &event.start_time)
}

/// Event end as a local instant. Multi-day events end on `end_date`.
pub fn end_at(event: &Event) -> Option<NaiveDateTime> {
    combine(&event.end_date_ymd(), &event.end_time)
}

/// Derive the status at `now`.
///
/// Unparseable date/time fields fail open to `Active` rather than
/// erroring; a corrupt row should render, not crash a view.
pub fn derive_status(event: &Event, now: NaiveDateTime) -> DerivedStatus {
    if event.status == StoredStatus::Cancelled {
        return DerivedStatus::Cancelled;
    }
    let (Some(start), Some(end)) = (start_at(event), end_at(event)) else {
        return DerivedStatus::Active;
    };
    if now >= end {
        DerivedStatus::Done
    } else if now >= start {
        DerivedStatus::Ongoing
    } else {
        DerivedStatus::Active
    }
}

/// Whether the event has ended at `now`. Fail-open: false when unparseable.
pub fn is_done(event: &Event, now: NaiveDateTime) -> bool {
    derive_status(event, now) == DerivedStatus::Done
}

/// RSVP responses lock once the event has started.
pub fn response_locked(event: &Event, now: NaiveDateTime) -> bool {
    match start_at(event) {
        Some(start) => now >= start,
        None => false,
    }
}

/// Editing locks once the event is done or cancelled.
pub fn edit_locked(event: &Event, now: NaiveDateTime) -> bool {
    matches!(
        derive_status(event, now),
        DerivedStatus::Done | DerivedStatus::Cancelled
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::event::EventType;
    use chrono::NaiveDate;

    fn at(ymd: &str, hm: &str) -> NaiveDateTime {
        combine(ymd, hm).expect("valid test instant")
    }

    fn event() -> Event {
        Event {
            id: 1,
            title: "Budget hearing".into(),
            event_type: EventType::Meeting,
            date: "2025-06-10".into(),
            end_date: None,
            start_time: "09:00:00".into(),
            end_time: "10:00:00".into(),
            location: None,
            description: None,
            color: None,
            created_by: 7,
            creator_name: None,
            status: StoredStatus::Active,
            cancel_reason: None,
            rescheduled_to_event: None,
            rescheduled_from_event: None,
            required_post_document: None,
            post_document_required: false,
            attendees: Vec::new(),
            rsvps: Vec::new(),
            attachments: Vec::new(),
            conflict_count: 0,
            participants_summary: None,
            created_at: None,
            updated_at: None,
            canceled_at: None,
        }
    }

    #[test]
    fn active_before_start() {
        let clock = FixedClock(at("2025-06-10", "08:59"));
        assert_eq!(derive_status(&event(), clock.now()), DerivedStatus::Active);
    }

    #[test]
    fn ongoing_between_start_and_end() {
        assert_eq!(
            derive_status(&event(), at("2025-06-10", "09:00")),
            DerivedStatus::Ongoing
        );
        assert_eq!(
            derive_status(&event(), at("2025-06-10", "09:59")),
            DerivedStatus::Ongoing
        );
    }

    #[test]
    fn done_at_end() {
        assert_eq!(
            derive_status(&event(), at("2025-06-10", "10:00")),
            DerivedStatus::Done
        );
    }

    #[test]
    fn cancelled_overrides_everything() {
        let mut e = event();
        e.status = StoredStatus::Cancelled;
        assert_eq!(
            derive_status(&e, at("2025-06-10", "10:30")),
            DerivedStatus::Cancelled
        );
        assert_eq!(
            derive_status(&e, at("2025-06-01", "00:00")),
            DerivedStatus::Cancelled
        );
    }

    #[test]
    fn multi_day_uses_end_date() {
        let mut e = event();
        e.end_date = Some("2025-06-12".into());
        assert_eq!(
            derive_status(&e, at("2025-06-11", "12:00")),
            DerivedStatus::Ongoing
        );
        assert_eq!(
            derive_status(&e, at("2025-06-12", "10:00")),
            DerivedStatus::Done
        );
    }

    #[test]
    fn unparseable_fields_fail_open_to_active() {
        let mut e = event();
        e.start_time = "not-a-time".into();
        assert_eq!(
            derive_status(&e, at("2025-06-10", "12:00")),
            DerivedStatus::Active
        );
        assert!(!is_done(&e, at("2025-06-10", "12:00")));
    }

    #[test]
    fn response_lock_at_start() {
        let e = event();
        assert!(!response_locked(&e, at("2025-06-10", "08:59")));
        assert!(response_locked(&e, at("2025-06-10", "09:00")));
    }

    #[test]
    fn edit_lock_when_done_or_cancelled() {
        let e = event();
        assert!(!edit_locked(&e, at("2025-06-10", "09:30")));
        assert!(edit_locked(&e, at("2025-06-10", "10:00")));

        let mut cancelled = event();
        cancelled.status = StoredStatus::Cancelled;
        let noon = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert!(edit_locked(&cancelled, noon));
    }
}
