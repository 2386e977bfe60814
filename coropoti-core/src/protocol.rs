//! Wire types for the COROPOTI REST API.
//!
//! Request bodies the client sends and the response envelopes the server
//! returns. Entity shapes (events, users, conflicts) live in their own
//! modules; this file is just the call-shaped plumbing.

use serde::{Deserialize, Serialize};

use crate::event::{EventType, RsvpStatus};
use crate::user::User;

/// Error envelope every non-2xx response carries.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// --- Auth ---

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// --- Events ---

/// Query parameters for `GET /events`.
#[derive(Debug, Default, Serialize)]
pub struct EventListQuery {
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

/// Body for `PUT /events/:id`. Creation goes through multipart instead
/// because an attachment may accompany it.
#[derive(Debug, Serialize)]
pub struct EventUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee_ids: Option<Vec<i64>>,
    /// Required when an admin confirms a drag-move.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_reason: Option<String>,
}

impl EventUpdateRequest {
    /// A bare date/time move, as produced by the move workflow.
    pub fn for_move(date: String, start_time: String, end_time: String) -> Self {
        EventUpdateRequest {
            title: None,
            event_type: None,
            date: Some(date),
            start_time: Some(start_time),
            end_time: Some(end_time),
            location: None,
            description: None,
            color: None,
            attendee_ids: None,
            move_reason: None,
        }
    }
}

// --- RSVP ---

#[derive(Debug, Serialize)]
pub struct RsvpRequest {
    pub status: RsvpStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
}

// --- Cancel / reschedule ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelMode {
    Cancel,
    Reschedule,
}

#[derive(Debug, Serialize)]
pub struct CancelRequest {
    pub mode: CancelMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// New start date, required when mode is `Reschedule`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_end_date: Option<String>,
}

// --- Conflict pre-check ---

#[derive(Debug, Serialize)]
pub struct CheckConflictRequest {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_event_id: Option<i64>,
}

/// A candidate clash from `POST /events/check-conflict`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConflict {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckConflictResponse {
    #[serde(default)]
    pub conflicts: Vec<CheckConflict>,
}

// --- Invitations ---

/// A pending invite row from `GET /invitations`.
#[derive(Debug, Clone, Deserialize)]
pub struct Invitation {
    pub event_id: i64,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_skips_absent_fields() {
        let req = EventUpdateRequest::for_move(
            "2025-06-11".into(),
            "09:00:00".into(),
            "10:00:00".into(),
        );
        let json = serde_json::to_value(&req).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["date"], "2025-06-11");
        assert!(!obj.contains_key("move_reason"));
    }

    #[test]
    fn cancel_mode_serializes_lowercase() {
        let req = CancelRequest {
            mode: CancelMode::Reschedule,
            reason: None,
            new_date: Some("2025-06-16".into()),
            new_end_date: None,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["mode"], "reschedule");
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn rsvp_request_carries_only_relevant_detail() {
        let req = RsvpRequest {
            status: RsvpStatus::Accepted,
            representative_name: Some("J. Dela Cruz".into()),
            decline_reason: None,
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["status"], "accepted");
        assert!(json.get("decline_reason").is_none());
    }
}
