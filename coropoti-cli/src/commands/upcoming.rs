//! Upcoming events: everything not yet finished, today included.

use anyhow::Result;
use chrono::Duration;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::event::Event;
use coropoti_core::protocol::EventListQuery;
use coropoti_core::status::end_at;

use super::{UPCOMING_FUTURE_DAYS, UPCOMING_PAST_DAYS};
use crate::context;
use crate::render::render_event_row;
use crate::utils::tui::create_spinner;

pub async fn run(query: Option<String>, host: Option<i64>) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let list_query = EventListQuery {
        start: (now.date() - Duration::days(UPCOMING_PAST_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
        end: (now.date() + Duration::days(UPCOMING_FUTURE_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
        q: query.clone(),
    };

    let spinner = create_spinner("Loading upcoming events...");
    let events = ctx.client.list_events(&list_query).await;
    spinner.finish_and_clear();

    let mut events = events?;
    events.retain(|e| is_unfinished(e, now) && host.is_none_or(|h| e.created_by == h));
    events.sort_by(|a, b| {
        (a.date_ymd(), a.start_time.clone()).cmp(&(b.date_ymd(), b.start_time.clone()))
    });

    println!("{}", "Upcoming".bold());
    if events.is_empty() {
        println!("   {}", "No upcoming events.".dimmed());
        return Ok(());
    }
    for event in &events {
        println!("   {}", render_event_row(event, now));
    }
    println!();
    println!("   {}", format!("{} event(s)", events.len()).dimmed());
    Ok(())
}

/// Keep events whose end is still in the future. Fail open: keep rows the
/// date parser cannot make sense of.
fn is_unfinished(event: &Event, now: chrono::NaiveDateTime) -> bool {
    match end_at(event) {
        Some(end) => end > now,
        None => true,
    }
}
