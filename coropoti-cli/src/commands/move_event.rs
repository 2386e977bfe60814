//! Move an event to another date/time.
//!
//! The guard runs before any network call: capability, ownership,
//! doneness, weekend lock. Ordinary creators apply directly; admins are
//! asked for a reason first and the reason travels with the update. The
//! whole exchange is tracked through a pending/applied/reverted state so
//! a failed save is reported as a revert, never silently dropped.

use anyhow::{Result, bail};
use dialoguer::Input;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::datetime::normalize_time;
use coropoti_core::protocol::EventUpdateRequest;
use coropoti_core::reschedule::{MoveOutcome, MoveState, guard_move, reconcile_target};

use crate::commands::new::parse_date_input;
use crate::context;
use crate::render::render_event_row;
use crate::utils::tui::create_spinner;

pub async fn run(id: i64, date: &str, start: Option<String>, end: Option<String>) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Loading event...");
    let event = ctx.client.get_event(id).await;
    spinner.finish_and_clear();
    let event = event?;

    let target = reconcile_target(&parse_date_input(date)?, None);
    let reason = match guard_move(&ctx.capabilities, &ctx.user, &event, &target.date, now) {
        MoveOutcome::Reject(message) => bail!("{message}"),
        MoveOutcome::Apply => None,
        MoveOutcome::NeedsReason => {
            let reason: String = Input::new()
                .with_prompt("  Reason for moving this event")
                .interact_text()?;
            if reason.trim().is_empty() {
                bail!("A reason is required to move another office's event.");
            }
            Some(reason)
        }
    };

    let start_time = normalize_time(start.as_deref().unwrap_or(&event.start_time));
    let end_time = normalize_time(end.as_deref().unwrap_or(&event.end_time));

    let mut state = MoveState::default();
    state.begin(event.id, target.date.clone(), start_time.clone(), end_time.clone());

    let mut request =
        EventUpdateRequest::for_move(target.date.clone(), start_time, end_time);
    request.move_reason = reason;

    let spinner = create_spinner("Moving...");
    let result = ctx.client.update_event(event.id, &request).await;
    spinner.finish_and_clear();

    match result {
        Ok(_) => {
            state.apply();
        }
        Err(err) => {
            state.revert();
            bail!("Move reverted: {err}");
        }
    }

    // Refetch so the confirmation reflects what the server stored.
    let updated = ctx.client.get_event(event.id).await?;
    state.reset();

    println!(
        "{}",
        format!("  Moved #{} to {}", updated.id, updated.date_ymd()).green()
    );
    println!("   {}", render_event_row(&updated, now));
    Ok(())
}
