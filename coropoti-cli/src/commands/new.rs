//! Create an event.
//!
//! Missing fields are prompted for interactively. Before anything is sent
//! the draft goes through client-side validation (ordered times, weekend
//! lock across the whole date range) and a conflict pre-check against the
//! server; overlapping events are shown and the submission is blocked
//! while any conflict remains. The only way forward is another slot.

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Datelike;
use dialoguer::{Input, MultiSelect};
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::datetime::{minutes_to_time, normalize_date};
use coropoti_core::draft::EventDraft;
use coropoti_core::event::EventType;
use coropoti_core::protocol::{CheckConflict, CheckConflictRequest};
use coropoti_core::tentative::build_tentative_description;

use crate::context::Ctx;
use crate::utils::tui::create_spinner;
use crate::{context, render};

pub struct NewArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub start: String,
    pub end: String,
    pub event_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub tentative: bool,
    pub tentative_note: Option<String>,
    pub attendees: Vec<i64>,
    pub attachment: Option<PathBuf>,
}

pub async fn run(args: NewArgs) -> Result<()> {
    let ctx = context::authed().await?;

    let title = match args.title {
        Some(t) => t,
        None => Input::new().with_prompt("  Title").interact_text()?,
    };
    let event_type = parse_event_type(&args.event_type)?;
    let date = match args.date {
        Some(d) => parse_date_input(&d)?,
        None => prompt_date("  Date (e.g. 2025-06-10 or \"next monday\")")?,
    };
    let end_date = match args.end_date {
        Some(d) => parse_date_input(&d)?,
        None => date.clone(),
    };
    let description = build_tentative_description(
        args.tentative,
        args.tentative_note.as_deref().unwrap_or(""),
        args.description.as_deref().unwrap_or(""),
    );
    let attendees = if args.attendees.is_empty() {
        prompt_attendees(&ctx).await?
    } else {
        args.attendees
    };

    let draft = EventDraft {
        title,
        event_type,
        date,
        end_date: Some(end_date),
        start_time: args.start,
        end_time: args.end,
        location: args.location,
        description,
        color: None,
        attendee_ids: attendees,
    };
    draft.validate_create()?;
    preflight_conflicts(&ctx, &draft, None).await?;

    let spinner = create_spinner("Creating event...");
    let result = ctx
        .client
        .create_event(draft_fields(&draft), args.attachment.as_deref())
        .await;
    spinner.finish_and_clear();

    let event = match result {
        Ok(event) => event,
        Err(err) => {
            // The server may have seen a conflict created after our
            // pre-check; refresh the panel so the message has context.
            let conflicts = fetch_conflicts(&ctx, &draft, None).await;
            if !conflicts.is_empty() {
                print_conflict_panel(&draft, &conflicts);
            }
            return Err(err);
        }
    };
    println!(
        "{}",
        format!("  Created #{}: {}", event.id, event.title).green()
    );
    println!("   {}", render::render_event_row(&event, SystemClock.now()));
    Ok(())
}

/// Check the requested slot server-side. Any clash blocks the submission;
/// there is no override, the slot itself has to change.
pub async fn preflight_conflicts(
    ctx: &Ctx,
    draft: &EventDraft,
    exclude_event_id: Option<i64>,
) -> Result<()> {
    let conflicts = fetch_conflicts(ctx, draft, exclude_event_id).await;
    ensure_no_conflicts(draft, &conflicts)
}

fn ensure_no_conflicts(draft: &EventDraft, conflicts: &[CheckConflict]) -> Result<()> {
    if conflicts.is_empty() {
        return Ok(());
    }
    print_conflict_panel(draft, conflicts);
    bail!(
        "The selected slot conflicts with {} existing event(s). Pick another date or time.",
        conflicts.len()
    );
}

/// The pre-check is advisory; a failing call reports no conflicts so it
/// never blocks submission (the server re-validates regardless).
async fn fetch_conflicts(
    ctx: &Ctx,
    draft: &EventDraft,
    exclude_event_id: Option<i64>,
) -> Vec<CheckConflict> {
    let spinner = create_spinner("Checking for conflicts...");
    let response = ctx
        .client
        .check_conflict(&CheckConflictRequest {
            date: draft.date.clone(),
            end_date: draft.end_date.clone(),
            start_time: draft.start_time_wire(),
            end_time: draft.end_time_wire(),
            exclude_event_id,
        })
        .await;
    spinner.finish_and_clear();
    response.map(|r| r.conflicts).unwrap_or_default()
}

/// Pick invited offices from the account list. Selecting none is fine.
async fn prompt_attendees(ctx: &Ctx) -> Result<Vec<i64>> {
    let spinner = create_spinner("Loading offices...");
    let users = ctx.client.users().await;
    spinner.finish_and_clear();

    let candidates: Vec<_> = users?
        .into_iter()
        .filter(|u| u.id != ctx.user.id)
        .collect();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let labels: Vec<String> = candidates
        .iter()
        .map(|u| format!("{} <{}>", u.name, u.email))
        .collect();
    let picked = MultiSelect::new()
        .with_prompt("  Invite offices (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()?;
    Ok(picked.into_iter().map(|i| candidates[i].id).collect())
}

fn print_conflict_panel(draft: &EventDraft, conflicts: &[CheckConflict]) {
    println!("  {}", "This slot overlaps existing events:".yellow().bold());
    for clash in conflicts {
        println!("     {}", describe_clash(draft, clash));
    }
}

fn describe_clash(draft: &EventDraft, clash: &CheckConflict) -> String {
    use coropoti_core::conflict::overlap_minutes;

    let mut line = format!(
        "{} ({}–{})",
        clash.title.bold(),
        clash.start_time,
        clash.end_time
    );
    if let Some((from, to)) = overlap_minutes(
        &draft.start_time_wire(),
        &draft.end_time_wire(),
        &clash.start_time,
        &clash.end_time,
    ) {
        line.push_str(&format!(
            " {}",
            format!("overlap {}–{}", minutes_to_time(from), minutes_to_time(to)).red()
        ));
    }
    line
}

/// Wire fields for the multipart create form.
fn draft_fields(draft: &EventDraft) -> Vec<(String, String)> {
    let mut fields = vec![
        ("title".to_string(), draft.title.clone()),
        (
            "type".to_string(),
            match draft.event_type {
                EventType::Meeting => "meeting".to_string(),
                EventType::Zoom => "zoom".to_string(),
                EventType::Event => "event".to_string(),
            },
        ),
        ("date".to_string(), draft.date.clone()),
        ("start_time".to_string(), draft.start_time_wire()),
        ("end_time".to_string(), draft.end_time_wire()),
    ];
    if let Some(end_date) = &draft.end_date {
        fields.push(("end_date".to_string(), end_date.clone()));
    }
    if let Some(location) = draft.location.as_deref() {
        if !location.is_empty() {
            fields.push(("location".to_string(), location.to_string()));
        }
    }
    if let Some(description) = &draft.description {
        fields.push(("description".to_string(), description.clone()));
    }
    if !draft.attendee_ids.is_empty() {
        let ids = draft
            .attendee_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        fields.push(("attendee_ids".to_string(), ids));
    }
    fields
}

pub fn parse_event_type(raw: &str) -> Result<EventType> {
    match raw.to_lowercase().as_str() {
        "meeting" => Ok(EventType::Meeting),
        "zoom" => Ok(EventType::Zoom),
        "event" => Ok(EventType::Event),
        other => bail!("Unknown event type \"{other}\" (expected meeting, zoom or event)"),
    }
}

/// Accept `YYYY-MM-DD` directly, otherwise hand the input to fuzzydate.
pub fn parse_date_input(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let ymd = normalize_date(trimmed);
    if chrono::NaiveDate::parse_from_str(&ymd, "%Y-%m-%d").is_ok() {
        return Ok(ymd);
    }
    let dt = fuzzydate::parse(&trimmed.to_lowercase())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{input}\""))?;
    Ok(format!(
        "{:04}-{:02}-{:02}",
        dt.year(),
        dt.month(),
        dt.day()
    ))
}

/// Prompt for a date with retry on parse errors.
fn prompt_date(prompt: &str) -> Result<String> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse_date_input(&input) {
            Ok(d) => return Ok(d),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_pass_through() {
        assert_eq!(parse_date_input("2025-06-10").unwrap(), "2025-06-10");
        assert_eq!(
            parse_date_input("2025-06-10T00:00:00.000Z").unwrap(),
            "2025-06-10"
        );
    }

    #[test]
    fn event_type_parsing_is_case_insensitive() {
        assert_eq!(parse_event_type("Zoom").unwrap(), EventType::Zoom);
        assert!(parse_event_type("webinar").is_err());
    }

    #[test]
    fn any_conflict_blocks_submission() {
        let draft = EventDraft {
            title: "Budget hearing".into(),
            event_type: EventType::Meeting,
            date: "2025-06-10".into(),
            end_date: Some("2025-06-10".into()),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            location: None,
            description: None,
            color: None,
            attendee_ids: Vec::new(),
        };
        assert!(ensure_no_conflicts(&draft, &[]).is_ok());

        let clash = CheckConflict {
            id: Some(3),
            title: "Planning sync".into(),
            date: Some("2025-06-10".into()),
            start_time: "09:30:00".into(),
            end_time: "11:00:00".into(),
        };
        let err = ensure_no_conflicts(&draft, &[clash]).unwrap_err();
        assert!(err.to_string().contains("Pick another date or time"));
    }

    #[test]
    fn fields_omit_empty_optionals() {
        let draft = EventDraft {
            title: "Budget hearing".into(),
            event_type: EventType::Meeting,
            date: "2025-06-10".into(),
            end_date: Some("2025-06-10".into()),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            location: None,
            description: None,
            color: None,
            attendee_ids: vec![4, 7],
        };
        let fields = draft_fields(&draft);
        assert!(fields.iter().any(|(k, v)| k == "start_time" && v == "09:00:00"));
        assert!(!fields.iter().any(|(k, _)| k == "location"));
        assert!(fields.iter().any(|(k, v)| k == "attendee_ids" && v == "4,7"));
    }
}
