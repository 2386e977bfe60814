//! Full event detail: responses, attachments, history.

use anyhow::Result;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::event::{Event, StoredStatus};
use coropoti_core::status::is_done;
use coropoti_core::tentative::parse_tentative_description;

use crate::context;
use crate::render::{Render, render_event_header};
use crate::utils::tui::create_spinner;

pub async fn run(id: i64) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Loading event...");
    let event = ctx.client.get_event(id).await;
    spinner.finish_and_clear();

    let event = event?;
    let meta = parse_tentative_description(event.description.as_deref().unwrap_or(""));

    println!("{}", render_event_header(&event, now));

    if meta.is_tentative {
        let mut banner = "TENTATIVE SCHEDULE".to_string();
        if !meta.note.is_empty() {
            banner.push_str(&format!(" — {}", meta.note));
        }
        println!("  {}", banner.yellow().bold());
    }

    if event.status == StoredStatus::Cancelled {
        if let Some(reason) = event.cancel_reason.as_deref() {
            println!("  {}", format!("Cancelled: {reason}").red());
        }
    }
    if let Some(link) = &event.rescheduled_to_event {
        println!(
            "  {}",
            format!("Rescheduled to #{} ({})", link.id, link.title).dimmed()
        );
    }
    if let Some(link) = &event.rescheduled_from_event {
        println!(
            "  {}",
            format!("Rescheduled from #{} ({})", link.id, link.title).dimmed()
        );
    }

    if !meta.plain_description.is_empty() {
        println!();
        for line in meta.plain_description.lines() {
            println!("  {line}");
        }
    }

    if !event.rsvps.is_empty() {
        println!();
        println!("  {}", "Responses".bold());
        for rsvp in &event.rsvps {
            println!("     {}", rsvp.render());
        }
    } else if !event.attendees.is_empty() {
        println!();
        println!("  {}", "Invited".bold());
        for attendee in &event.attendees {
            println!("     {}", attendee.name);
        }
    }

    render_attachments(&event);
    render_post_document(&event, &ctx.user, is_done(&event, now));
    render_history(&event);

    Ok(())
}

fn render_attachments(event: &Event) {
    let ordinary: Vec<_> = event
        .attachments
        .iter()
        .filter(|a| !a.is_post_document)
        .collect();
    if ordinary.is_empty() {
        return;
    }
    println!();
    println!("  {}", "Attachments".bold());
    for attachment in ordinary {
        println!("     {}  {}", attachment.original_name, attachment.url.dimmed());
    }
}

fn render_post_document(event: &Event, viewer: &coropoti_core::user::User, done: bool) {
    if !event.post_document_required {
        return;
    }
    println!();
    println!("  {}", event.post_document_label().bold());
    let uploaded: Vec<_> = event.post_documents().collect();
    if uploaded.is_empty() {
        if done && event.created_by == viewer.id {
            println!(
                "     {}",
                format!("Not yet uploaded. Run `coropoti upload-doc {} <file>`.", event.id).yellow()
            );
        } else {
            println!("     {}", "Not yet uploaded.".dimmed());
        }
    } else {
        for doc in uploaded {
            println!("     {}  {}", doc.original_name, doc.url.dimmed());
        }
    }
}

fn render_history(event: &Event) {
    let entries = history_entries(event);
    if entries.is_empty() {
        return;
    }
    println!();
    println!("  {}", "History".bold());
    for (at, what) in entries {
        println!("     {}  {}", at.dimmed(), what);
    }
}

/// Timeline entries as (timestamp, description), newest first.
fn history_entries(event: &Event) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();
    if let Some(at) = event.created_at.as_deref() {
        entries.push((at.to_string(), "created".to_string()));
    }
    for rsvp in &event.rsvps {
        if let Some(at) = rsvp.responded_at.as_deref() {
            let office = rsvp.office_name.as_deref().unwrap_or("an office");
            entries.push((
                at.to_string(),
                format!("{office} {}", rsvp.status.label().to_lowercase()),
            ));
        }
    }
    for doc in event.post_documents() {
        if let Some(at) = doc.created_at.as_deref() {
            entries.push((
                at.to_string(),
                format!("{} uploaded: {}", event.post_document_label(), doc.original_name),
            ));
        }
    }
    if let Some(at) = event.updated_at.as_deref() {
        entries.push((at.to_string(), "last updated".to_string()));
    }
    if let Some(at) = event.canceled_at.as_deref() {
        let what = match &event.rescheduled_to_event {
            Some(link) => format!("cancelled and rescheduled to #{}", link.id),
            None => "cancelled".to_string(),
        };
        entries.push((at.to_string(), what));
    }
    // Newest first.
    entries.sort_by(|a, b| b.0.cmp(&a.0));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use coropoti_core::event::{Attachment, EventLink, EventType, StoredStatus};

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
            post_document_required: true,
            attendees: Vec::new(),
            rsvps: Vec::new(),
            attachments: Vec::new(),
            conflict_count: 0,
            participants_summary: None,
            created_at: Some("2025-06-01T08:00:00Z".into()),
            updated_at: None,
            canceled_at: None,
        }
    }

    #[test]
    fn history_includes_document_uploads_newest_first() {
        let mut e = event();
        e.attachments.push(Attachment {
            id: 1,
            original_name: "minutes.pdf".into(),
            url: "/files/minutes.pdf".into(),
            is_post_document: true,
            created_at: Some("2025-06-10T11:00:00Z".into()),
        });
        let entries = history_entries(&e);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].1.contains("minutes.pdf"));
        assert!(entries[0].1.contains("Minutes of the Meeting"));
        assert_eq!(entries[1].1, "created");
    }

    #[test]
    fn history_marks_reschedules() {
        let mut e = event();
        e.status = StoredStatus::Cancelled;
        e.canceled_at = Some("2025-06-05T09:00:00Z".into());
        e.rescheduled_to_event = Some(EventLink {
            id: 42,
            title: "Budget hearing".into(),
            date: Some("2025-06-16".into()),
        });
        let entries = history_entries(&e);
        assert_eq!(entries[0].1, "cancelled and rescheduled to #42");
    }
}
