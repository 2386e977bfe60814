//! TUI rendering traits for COROPOTI types.
//!
//! Extension traits that add colored terminal rendering to core types
//! using owo_colors. Every view derives status labels through these at
//! render time; nothing here caches across clock ticks.

use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use coropoti_core::conflict::ConflictRow;
use coropoti_core::datetime::{format_date_label, format_date_range, format_time_short};
use coropoti_core::event::{Event, Rsvp, RsvpStatus};
use coropoti_core::status::{DerivedStatus, derive_status};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DerivedStatus {
    fn render(&self) -> String {
        match self {
            DerivedStatus::Active => self.label().green().to_string(),
            DerivedStatus::Ongoing => self.label().yellow().to_string(),
            DerivedStatus::Done => self.label().dimmed().to_string(),
            DerivedStatus::Cancelled => self.label().red().to_string(),
        }
    }
}

impl Render for RsvpStatus {
    fn render(&self) -> String {
        match self {
            RsvpStatus::Pending => self.label().yellow().to_string(),
            RsvpStatus::Accepted => self.label().green().to_string(),
            RsvpStatus::Declined => self.label().red().to_string(),
        }
    }
}

impl Render for Rsvp {
    fn render(&self) -> String {
        let office = self.office_name.as_deref().unwrap_or("Unknown office");
        let mut line = format!("{office}: {}", self.status.render());
        if self.status == RsvpStatus::Accepted {
            if let Some(rep) = self.representative_name.as_deref() {
                line.push_str(&format!(" — Rep: {rep}"));
            }
        }
        if self.status == RsvpStatus::Declined {
            if let Some(reason) = self.decline_reason.as_deref() {
                line.push_str(&format!(" — Reason: {reason}"));
            }
        }
        line
    }
}

impl Render for ConflictRow {
    fn render(&self) -> String {
        let mut badges = Vec::new();
        if self.time_conflict {
            badges.push("Time".yellow().to_string());
        }
        if self.participant_conflict {
            badges.push("Participants".magenta().to_string());
        }
        format!(
            "{} ({} {}–{}) {} {} ({} {}–{}) [{}]",
            self.event_title.bold(),
            self.event_date,
            format_time_short(&self.event_start),
            format_time_short(&self.event_end),
            "↔".dimmed(),
            self.conflicting_title.bold(),
            self.conflicting_date,
            format_time_short(&self.conflicting_start),
            format_time_short(&self.conflicting_end),
            badges.join(", ")
        )
    }
}

/// One-line event row for list views, with the status derived at `now`.
pub fn render_event_row(event: &Event, now: NaiveDateTime) -> String {
    let status = derive_status(event, now);
    let mut line = format!(
        "{:>5}  {}  {}–{}  {}",
        format!("#{}", event.id).dimmed(),
        format_date_label(&event.date_ymd()),
        format_time_short(&event.start_time),
        format_time_short(&event.end_time),
        event.title.bold(),
    );
    if let Some(location) = event.location.as_deref() {
        if !location.is_empty() {
            line.push_str(&format!(" {}", format!("• {location}").dimmed()));
        }
    }
    line.push_str(&format!("  [{}]", status.render()));
    if event.conflict_count > 0 {
        line.push_str(&format!("  {}", "⚠ conflict".yellow()));
    }
    line
}

/// Multi-line header block for the detail view.
pub fn render_event_header(event: &Event, now: NaiveDateTime) -> String {
    let status = derive_status(event, now);
    let host = event.creator_name.as_deref().unwrap_or("Unknown");
    let mut lines = vec![
        format!("{}  [{}]", event.title.bold(), status.render()),
        format!(
            "  {}  {}–{}",
            format_date_range(&event.date_ymd(), &event.end_date_ymd()),
            format_time_short(&event.start_time),
            format_time_short(&event.end_time),
        ),
        format!("  Type: {}   Host: {}", event.event_type.label(), host),
    ];
    if let Some(location) = event.location.as_deref() {
        if !location.is_empty() {
            lines.push(format!("  Location: {location}"));
        }
    }
    lines.join("\n")
}
