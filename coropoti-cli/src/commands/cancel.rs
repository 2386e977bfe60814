//! Cancel an event, or cancel-and-reschedule it to a new date.
//!
//! A plain cancel keeps the row visible with a red label and its reason.
//! Reschedule (admins only) cancels the original and creates a linked
//! replacement on the new date; both directions of the link show up in
//! the detail view afterwards.

use anyhow::{Result, bail};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::datetime::{date_range_ymd, is_weekend, parse_ymd};
use coropoti_core::event::StoredStatus;
use coropoti_core::protocol::{CancelMode, CancelRequest};
use coropoti_core::status::is_done;

use crate::commands::new::parse_date_input;
use crate::context;
use crate::utils::tui::create_spinner;

pub async fn run(
    id: i64,
    reason: Option<String>,
    reschedule: bool,
    date: Option<String>,
    end_date: Option<String>,
) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Loading event...");
    let event = ctx.client.get_event(id).await;
    spinner.finish_and_clear();
    let event = event?;

    if !ctx.capabilities.can_modify(&ctx.user, event.created_by) {
        bail!("Only the host or an admin can cancel this event.");
    }
    if event.status == StoredStatus::Cancelled {
        bail!("This event is already cancelled.");
    }
    if is_done(&event, now) {
        bail!("This event is already done and is view-only.");
    }

    let request = if reschedule {
        if !ctx.user.is_admin() {
            bail!("Only admins can cancel-and-reschedule.");
        }
        let new_date = match date {
            Some(d) => parse_date_input(&d)?,
            None => bail!("--reschedule needs --date for the new start."),
        };
        let new_end_date = match end_date {
            Some(d) => parse_date_input(&d)?,
            None => new_date.clone(),
        };
        if parse_ymd(&new_end_date)? < parse_ymd(&new_date)? {
            bail!("End date must be the same as or after start date.");
        }
        if date_range_ymd(&new_date, &new_end_date)
            .iter()
            .any(|d| is_weekend(d))
        {
            bail!("Weekends are locked. Please use weekdays only in the new date range.");
        }
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Cancel \"{}\" and reschedule it to {new_date}?",
                event.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            bail!("Nothing changed.");
        }
        CancelRequest {
            mode: CancelMode::Reschedule,
            reason,
            new_date: Some(new_date),
            new_end_date: Some(new_end_date),
        }
    } else {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Cancel \"{}\"? Invited offices will see it as cancelled.",
                event.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            bail!("Nothing changed.");
        }
        CancelRequest {
            mode: CancelMode::Cancel,
            reason,
            new_date: None,
            new_end_date: None,
        }
    };

    let spinner = create_spinner("Cancelling...");
    let result = ctx.client.cancel_event(event.id, &request).await;
    spinner.finish_and_clear();
    result?;

    if reschedule {
        println!(
            "{}",
            format!("  Cancelled #{} and scheduled its replacement.", event.id).green()
        );
    } else {
        println!("{}", format!("  Cancelled #{}.", event.id).green());
    }
    Ok(())
}
