//! Move/resize policy for rescheduling events.
//!
//! The policy from the scheduling rules, independent of any rendering
//! surface: moves are guarded (capability, doneness, weekend lock), admins
//! must confirm with a reason before anything is saved, and when two
//! sources disagree about the target date the authoritative one wins and
//! the optimistic change is reverted before re-applying.

use chrono::NaiveDateTime;

use crate::capability::CapabilityMap;
use crate::datetime::{is_weekend, normalize_date};
use crate::event::Event;
use crate::status::is_done;
use crate::user::User;

/// What a requested move resolves to, before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Apply the update directly (ordinary creator).
    Apply,
    /// Admin moves always go through a confirm-with-reason step first.
    NeedsReason,
    /// Revert the change and tell the user why.
    Reject(&'static str),
}

/// A requested move after target reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTarget {
    pub date: String,
    /// True when the optimistic change pointed at a different date and
    /// must be visually reverted before the corrected update is applied.
    pub optimistic_reverted: bool,
}

/// Pick the authoritative target date.
///
/// `reported` is what the interaction surface claims was hit; `resolved`
/// is the date actually under the pointer when one could be determined.
/// The resolved date wins, and a disagreement marks the optimistic change
/// as reverted.
pub fn reconcile_target(reported: &str, resolved: Option<&str>) -> MoveTarget {
    let reported = normalize_date(reported);
    match resolved {
        Some(r) => {
            let resolved = normalize_date(r);
            let reverted = resolved != reported;
            MoveTarget {
                date: resolved,
                optimistic_reverted: reverted,
            }
        }
        None => MoveTarget {
            date: reported,
            optimistic_reverted: false,
        },
    }
}

/// Guard a move/resize request. Checks run in rejection-priority order:
/// drag capability, ownership, doneness, weekend lock.
pub fn guard_move(
    capabilities: &CapabilityMap,
    actor: &User,
    event: &Event,
    target_date: &str,
    now: NaiveDateTime,
) -> MoveOutcome {
    if !capabilities.can_drag(actor) {
        return MoveOutcome::Reject("This account cannot move events.");
    }
    if !capabilities.can_modify(actor, event.created_by) {
        return MoveOutcome::Reject("Only the host or an admin can move this event.");
    }
    if is_done(event, now) {
        return MoveOutcome::Reject("This event is already done and is view-only.");
    }
    if is_weekend(target_date) {
        return MoveOutcome::Reject("Weekends are locked. Please use a weekday.");
    }
    if actor.is_admin() {
        MoveOutcome::NeedsReason
    } else {
        MoveOutcome::Apply
    }
}

/// Lifecycle of one pending mutation: `Idle -> Pending -> Applied|Reverted`.
///
/// Applied/Reverted also serve as the post-drop suppression check: while a
/// move sits in either terminal state the view ignores stray activations
/// until the next refetch resets it to Idle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MoveState {
    #[default]
    Idle,
    Pending {
        event_id: i64,
        date: String,
        start_time: String,
        end_time: String,
    },
    Applied,
    Reverted,
}

impl MoveState {
    /// Start tracking a move. Only valid from Idle; a second concurrent
    /// move is refused so two drops can never race each other.
    pub fn begin(
        &mut self,
        event_id: i64,
        date: String,
        start_time: String,
        end_time: String,
    ) -> bool {
        if *self != MoveState::Idle {
            return false;
        }
        *self = MoveState::Pending {
            event_id,
            date,
            start_time,
            end_time,
        };
        true
    }

    /// Mark the pending move as saved server-side.
    pub fn apply(&mut self) -> bool {
        if matches!(self, MoveState::Pending { .. }) {
            *self = MoveState::Applied;
            true
        } else {
            false
        }
    }

    /// Roll the pending move back (guard rejection or server error).
    pub fn revert(&mut self) -> bool {
        if matches!(self, MoveState::Pending { .. }) {
            *self = MoveState::Reverted;
            true
        } else {
            false
        }
    }

    /// Ready for the next interaction after a refetch.
    pub fn reset(&mut self) {
        *self = MoveState::Idle;
    }

    /// True while a terminal state suppresses follow-up activations.
    pub fn suppresses_activation(&self) -> bool {
        matches!(self, MoveState::Applied | MoveState::Reverted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::combine;
    use crate::event::{EventType, StoredStatus};
    use crate::user::Role;

    fn at(ymd: &str, hm: &str) -> NaiveDateTime {
        combine(ymd, hm).expect("valid test instant")
    }

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            name: "Office".into(),
            email: format!("office{id}@example.gov"),
            role,
            color: None,
        }
    }

    fn event(created_by: i64) -> Event {
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
            created_by,
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
    fn resolved_date_wins_and_marks_revert() {
        let target = reconcile_target("2025-06-11", Some("2025-06-12"));
        assert_eq!(target.date, "2025-06-12");
        assert!(target.optimistic_reverted);
    }

    #[test]
    fn agreeing_dates_do_not_revert() {
        let target = reconcile_target("2025-06-11", Some("2025-06-11"));
        assert!(!target.optimistic_reverted);
        let target = reconcile_target("2025-06-11", None);
        assert_eq!(target.date, "2025-06-11");
        assert!(!target.optimistic_reverted);
    }

    #[test]
    fn read_only_office_is_rejected_first() {
        let caps = CapabilityMap::read_only_offices(["office7@example.gov"]);
        let outcome = guard_move(
            &caps,
            &user(7, Role::User),
            &event(7),
            "2025-06-11",
            at("2025-06-10", "08:00"),
        );
        assert!(matches!(outcome, MoveOutcome::Reject(_)));
    }

    #[test]
    fn non_owner_is_rejected() {
        let caps = CapabilityMap::default();
        let outcome = guard_move(
            &caps,
            &user(8, Role::User),
            &event(7),
            "2025-06-11",
            at("2025-06-10", "08:00"),
        );
        assert_eq!(
            outcome,
            MoveOutcome::Reject("Only the host or an admin can move this event.")
        );
    }

    #[test]
    fn done_event_is_view_only() {
        let caps = CapabilityMap::default();
        let outcome = guard_move(
            &caps,
            &user(7, Role::User),
            &event(7),
            "2025-06-11",
            at("2025-06-10", "10:30"),
        );
        assert_eq!(
            outcome,
            MoveOutcome::Reject("This event is already done and is view-only.")
        );
    }

    #[test]
    fn weekend_target_is_rejected() {
        let caps = CapabilityMap::default();
        let outcome = guard_move(
            &caps,
            &user(7, Role::User),
            &event(7),
            "2025-06-14",
            at("2025-06-10", "08:00"),
        );
        assert_eq!(
            outcome,
            MoveOutcome::Reject("Weekends are locked. Please use a weekday.")
        );
    }

    #[test]
    fn admin_always_confirms_with_reason() {
        let caps = CapabilityMap::default();
        let outcome = guard_move(
            &caps,
            &user(1, Role::Admin),
            &event(7),
            "2025-06-11",
            at("2025-06-10", "08:00"),
        );
        assert_eq!(outcome, MoveOutcome::NeedsReason);
    }

    #[test]
    fn creator_applies_directly() {
        let caps = CapabilityMap::default();
        let outcome = guard_move(
            &caps,
            &user(7, Role::User),
            &event(7),
            "2025-06-11",
            at("2025-06-10", "08:00"),
        );
        assert_eq!(outcome, MoveOutcome::Apply);
    }

    #[test]
    fn state_machine_happy_path() {
        let mut state = MoveState::default();
        assert!(state.begin(1, "2025-06-11".into(), "09:00:00".into(), "10:00:00".into()));
        assert!(state.apply());
        assert!(state.suppresses_activation());
        state.reset();
        assert_eq!(state, MoveState::Idle);
    }

    #[test]
    fn state_machine_refuses_concurrent_moves() {
        let mut state = MoveState::default();
        assert!(state.begin(1, "2025-06-11".into(), "09:00:00".into(), "10:00:00".into()));
        assert!(!state.begin(2, "2025-06-12".into(), "09:00:00".into(), "10:00:00".into()));
    }

    #[test]
    fn terminal_transitions_are_single_shot() {
        let mut state = MoveState::default();
        assert!(!state.apply());
        assert!(!state.revert());
        state.begin(1, "2025-06-11".into(), "09:00:00".into(), "10:00:00".into());
        assert!(state.revert());
        assert!(!state.apply());
        assert!(state.suppresses_activation());
    }
}
