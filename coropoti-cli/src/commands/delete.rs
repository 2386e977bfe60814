//! Permanently delete an event.

use anyhow::{Result, bail};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::status::is_done;

use crate::context;
use crate::utils::tui::create_spinner;

pub async fn run(id: i64, yes: bool) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Loading event...");
    let event = ctx.client.get_event(id).await;
    spinner.finish_and_clear();
    let event = event?;

    if !ctx.capabilities.can_delete(&ctx.user, event.created_by) {
        bail!("Only the host or an admin can delete this event.");
    }
    // Done events keep their record (and its post-event document).
    if is_done(&event, now) {
        bail!("This event is already done and is view-only.");
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Permanently delete \"{}\"? This cannot be undone.",
                event.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            bail!("Nothing deleted.");
        }
    }

    let spinner = create_spinner("Deleting...");
    let result = ctx.client.delete_event(event.id).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", format!("  Deleted #{}.", event.id).green());
    Ok(())
}
