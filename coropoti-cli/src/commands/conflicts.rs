//! Active schedule conflicts.
//!
//! Defaults to conflicts touching your own events; `--all` shows every
//! pair the server knows about.

use anyhow::Result;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::conflict::reduce_conflicts;

use crate::context;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn run(all: bool) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Checking conflicts...");
    let rows = if all {
        ctx.client.conflicts_list().await
    } else {
        ctx.client.conflicts_mine().await
    };
    spinner.finish_and_clear();

    let rows = reduce_conflicts(&rows?, now);

    let heading = if all {
        "Schedule conflicts (all offices)"
    } else {
        "Your schedule conflicts"
    };
    println!("{}", heading.bold());
    if rows.is_empty() {
        println!("   {}", "No active conflicts.".green());
        return Ok(());
    }
    for row in &rows {
        println!("   {}", row.render());
    }
    println!();
    println!(
        "   {}",
        format!("{} conflict(s); finished pairs are hidden", rows.len()).dimmed()
    );
    Ok(())
}
