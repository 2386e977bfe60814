//! Event types as the COROPOTI backend serves them.
//!
//! These mirror the REST API's JSON shapes. Dates and times stay as wire
//! strings (`YYYY-MM-DD`, `HH:MM:SS`); the logic modules parse them on
//! demand so a single malformed field never poisons a whole event list.

use serde::{Deserialize, Serialize};

use crate::datetime::normalize_date;

/// Event category. Determines the default color and which post-event
/// document the host owes once the event is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meeting,
    Zoom,
    Event,
}

impl EventType {
    pub fn label(self) -> &'static str {
        match self {
            EventType::Meeting => "Meeting",
            EventType::Zoom => "Zoom",
            EventType::Event => "Event",
        }
    }

    /// Fallback color when the creating office has none assigned.
    pub fn default_color(self) -> &'static str {
        match self {
            EventType::Meeting => "#3b82f6",
            EventType::Zoom => "#8b5cf6",
            EventType::Event => "#f59e0b",
        }
    }

    /// Label of the completion-proof document the host must upload.
    pub fn post_document_label(self) -> &'static str {
        match self {
            EventType::Event => "After Activity Report (AAR)",
            _ => "Minutes of the Meeting",
        }
    }
}

/// Stored (not derived) event status. `Done`/`Ongoing` never appear here;
/// they are computed from the clock, see [`crate::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredStatus {
    #[default]
    Active,
    Cancelled,
}

/// An invited office's response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl RsvpStatus {
    pub fn label(self) -> &'static str {
        match self {
            RsvpStatus::Pending => "Pending",
            RsvpStatus::Accepted => "Accepted",
            RsvpStatus::Declined => "Declined",
        }
    }
}

/// One RSVP row. The server keeps exactly one per invited office per event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rsvp {
    pub office_user_id: i64,
    #[serde(default)]
    pub office_name: Option<String>,
    #[serde(default)]
    pub status: RsvpStatus,
    #[serde(default)]
    pub representative_name: Option<String>,
    #[serde(default)]
    pub decline_reason: Option<String>,
    #[serde(default)]
    pub responded_at: Option<String>,
}

/// An uploaded file attached to an event. `is_post_document` distinguishes
/// the completion-proof document from ordinary attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub original_name: String,
    pub url: String,
    #[serde(default)]
    pub is_post_document: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// An invited participant (office account).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub user_id: i64,
    pub name: String,
}

/// Minimal summary of a linked event (reschedule source/target).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLink {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// A scheduled event as returned by `GET /events/:id`.
/// List endpoints return the same shape with the collections empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub created_by: i64,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub status: StoredStatus,
    #[serde(default)]
    pub cancel_reason: Option<String>,
    #[serde(default)]
    pub rescheduled_to_event: Option<EventLink>,
    #[serde(default)]
    pub rescheduled_from_event: Option<EventLink>,
    #[serde(default)]
    pub required_post_document: Option<String>,
    #[serde(default)]
    pub post_document_required: bool,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub rsvps: Vec<Rsvp>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub conflict_count: i64,
    #[serde(default)]
    pub participants_summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub canceled_at: Option<String>,
}

impl Event {
    /// Start date as `YYYY-MM-DD`.
    pub fn date_ymd(&self) -> String {
        normalize_date(&self.date)
    }

    /// End date as `YYYY-MM-DD`, defaulting to the start date.
    pub fn end_date_ymd(&self) -> String {
        match self.end_date.as_deref() {
            Some(d) if !d.trim().is_empty() => normalize_date(d),
            _ => self.date_ymd(),
        }
    }

    /// Whether the event spans more than one day.
    pub fn is_multi_day(&self) -> bool {
        self.end_date_ymd() > self.date_ymd()
    }

    /// Display color: stored color, else the type default.
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.event_type.default_color())
    }

    /// Label of the required post-event document.
    pub fn post_document_label(&self) -> &str {
        self.required_post_document
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.event_type.post_document_label())
    }

    /// This viewer's own RSVP row, if they were invited.
    pub fn rsvp_for(&self, user_id: i64) -> Option<&Rsvp> {
        self.rsvps.iter().find(|r| r.office_user_id == user_id)
    }

    /// Completion-proof documents already uploaded.
    pub fn post_documents(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(|a| a.is_post_document)
    }
}
