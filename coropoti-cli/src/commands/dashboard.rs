//! Dashboard: today's schedule, what's next, pending invitations.
//!
//! `--watch` keeps the view alive and re-derives status labels every 60
//! seconds from the already-fetched data; the tick itself triggers no
//! network traffic.

use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::event::Event;
use coropoti_core::protocol::{EventListQuery, Invitation};
use coropoti_core::status::end_at;

use super::{UPCOMING_FUTURE_DAYS, UPCOMING_PAST_DAYS};
use crate::context;
use crate::render::render_event_row;
use crate::utils::tui::create_spinner;

const WATCH_TICK_SECS: u64 = 60;

pub async fn run(watch: bool) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let query = EventListQuery {
        start: (now.date() - Duration::days(UPCOMING_PAST_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
        end: (now.date() + Duration::days(UPCOMING_FUTURE_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
        q: None,
    };

    let spinner = create_spinner("Loading dashboard...");
    let events = ctx.client.list_events(&query).await;
    let invitations = ctx.client.invitations().await;
    spinner.finish_and_clear();

    let events = events?;
    // Invitations are non-fatal to the dashboard.
    let invitations = invitations.unwrap_or_default();

    render(&events, &invitations, now);

    if watch {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(WATCH_TICK_SECS));
        tick.tick().await;
        loop {
            tick.tick().await;
            println!();
            println!("{}", "— refreshed status labels —".dimmed());
            render(&events, &invitations, SystemClock.now());
        }
    }

    Ok(())
}

fn render(events: &[Event], invitations: &[Invitation], now: NaiveDateTime) {
    let today = now.date().format("%Y-%m-%d").to_string();

    let mut todays: Vec<&Event> = events.iter().filter(|e| occurs_on(e, &today)).collect();
    todays.sort_by(|a, b| a.start_time.cmp(&b.start_time));

    let mut next: Vec<&Event> = events
        .iter()
        .filter(|e| e.date_ymd() > today && end_at(e).map(|end| end > now).unwrap_or(true))
        .collect();
    next.sort_by(|a, b| (a.date_ymd(), a.start_time.clone()).cmp(&(b.date_ymd(), b.start_time.clone())));
    next.truncate(5);

    println!("{}", "Today".bold());
    if todays.is_empty() {
        println!("   {}", "Nothing scheduled today.".dimmed());
    }
    for event in &todays {
        println!("   {}", render_event_row(event, now));
    }

    println!();
    println!("{}", "Next up".bold());
    if next.is_empty() {
        println!("   {}", "No upcoming events.".dimmed());
    }
    for event in &next {
        println!("   {}", render_event_row(event, now));
    }

    if !invitations.is_empty() {
        println!();
        println!(
            "{}",
            format!(
                "You have {} pending invitation(s). Run `coropoti invitations`.",
                invitations.len()
            )
            .yellow()
        );
    }
}

/// Whether the event's inclusive date span covers the given day.
fn occurs_on(event: &Event, ymd: &str) -> bool {
    let start = event.date_ymd();
    let end = event.end_date_ymd();
    start.as_str() <= ymd && ymd <= end.as_str()
}
