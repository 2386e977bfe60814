//! Recently finished events.

use anyhow::Result;
use chrono::Duration;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::protocol::EventListQuery;
use coropoti_core::status::{DerivedStatus, derive_status};

use crate::context;
use crate::render::render_event_row;
use crate::utils::tui::create_spinner;

pub async fn run(days: i64) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let query = EventListQuery {
        start: (now.date() - Duration::days(days))
            .format("%Y-%m-%d")
            .to_string(),
        end: now.date().format("%Y-%m-%d").to_string(),
        q: None,
    };

    let spinner = create_spinner("Loading recent events...");
    let events = ctx.client.list_events(&query).await;
    spinner.finish_and_clear();

    let mut events = events?;
    events.retain(|e| derive_status(e, now) == DerivedStatus::Done);
    // Most recent first.
    events.sort_by(|a, b| {
        (b.date_ymd(), b.start_time.clone()).cmp(&(a.date_ymd(), a.start_time.clone()))
    });

    println!("{}", format!("Done in the last {days} day(s)").bold());
    if events.is_empty() {
        println!("   {}", "Nothing finished in this window.".dimmed());
        return Ok(());
    }
    for event in &events {
        println!("   {}", render_event_row(event, now));
    }
    Ok(())
}
