//! Edit a single event in place.
//!
//! Only the provided flags change; everything else keeps its stored value.
//! Done events are view-only and a weekend date is rejected unless the
//! event already sat on it.

use anyhow::{Result, bail};

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::datetime::normalize_time;
use coropoti_core::draft::EventDraft;
use coropoti_core::protocol::EventUpdateRequest;
use coropoti_core::status::edit_locked;
use coropoti_core::tentative::{build_tentative_description, parse_tentative_description};

use crate::commands::new::{parse_date_input, preflight_conflicts};
use crate::context;
use crate::utils::tui::create_spinner;
use owo_colors::OwoColorize;

pub struct EditArgs {
    pub id: i64,
    pub title: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub attendees: Option<Vec<i64>>,
}

pub async fn run(args: EditArgs) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Loading event...");
    let event = ctx.client.get_event(args.id).await;
    spinner.finish_and_clear();
    let event = event?;

    if !ctx.capabilities.can_modify(&ctx.user, event.created_by) {
        bail!("Only the host or an admin can edit this event.");
    }
    if edit_locked(&event, now) {
        bail!("This event is already done and is view-only.");
    }

    let original_date = event.date_ymd();
    let new_date = match args.date.as_deref() {
        Some(d) => parse_date_input(d)?,
        None => original_date.clone(),
    };
    let new_start = args
        .start
        .clone()
        .unwrap_or_else(|| event.start_time.clone());
    let new_end = args.end.clone().unwrap_or_else(|| event.end_time.clone());

    let description = merged_description(
        event.description.as_deref().unwrap_or(""),
        args.description.as_deref(),
    );

    let draft = EventDraft {
        title: args.title.clone().unwrap_or_else(|| event.title.clone()),
        event_type: event.event_type,
        date: new_date.clone(),
        end_date: None,
        start_time: new_start.clone(),
        end_time: new_end.clone(),
        location: args.location.clone().or_else(|| event.location.clone()),
        description: description.clone().or_else(|| event.description.clone()),
        color: args.color.clone().or_else(|| event.color.clone()),
        attendee_ids: Vec::new(),
    };
    draft.validate_edit(&original_date)?;

    let slot_changed = new_date != original_date
        || normalize_time(&new_start) != event.start_time
        || normalize_time(&new_end) != event.end_time;
    if slot_changed {
        let mut check = draft.clone();
        check.end_date = Some(new_date.clone());
        preflight_conflicts(&ctx, &check, Some(event.id)).await?;
    }

    let request = EventUpdateRequest {
        title: args.title,
        event_type: None,
        date: Some(new_date),
        start_time: Some(draft.start_time_wire()),
        end_time: Some(draft.end_time_wire()),
        location: args.location,
        description,
        color: args.color,
        attendee_ids: args.attendees,
        move_reason: None,
    };

    let spinner = create_spinner("Saving...");
    let result = ctx.client.update_event(event.id, &request).await;
    spinner.finish_and_clear();

    let updated = result?;
    println!(
        "{}",
        format!("  Updated #{}: {}", updated.id, updated.title).green()
    );
    Ok(())
}

/// Wire value for the description field. `None` means "leave unchanged";
/// clearing sends an explicit empty string so the server actually drops
/// the text. A tentative marker on the stored description survives any
/// rewrite, including a clear.
fn merged_description(stored: &str, replacement: Option<&str>) -> Option<String> {
    let text = replacement?;
    let meta = parse_tentative_description(stored);
    Some(build_tentative_description(meta.is_tentative, &meta.note, text).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_replacement_leaves_description_alone() {
        assert_eq!(merged_description("old notes", None), None);
    }

    #[test]
    fn empty_replacement_clears_the_description() {
        assert_eq!(merged_description("old notes", Some("")).as_deref(), Some(""));
    }

    #[test]
    fn tentative_marker_survives_a_rewrite() {
        let stored = "[TENTATIVE] pending approval\nOld notes";
        assert_eq!(
            merged_description(stored, Some("New notes")).as_deref(),
            Some("[TENTATIVE] pending approval\nNew notes")
        );
        assert_eq!(
            merged_description(stored, Some("")).as_deref(),
            Some("[TENTATIVE] pending approval")
        );
    }
}
