//! Single-day view, multi-day spans included.

use anyhow::Result;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::datetime::{format_date_label, is_weekend, normalize_date, parse_ymd};
use coropoti_core::holiday::holidays_in_range;
use coropoti_core::protocol::EventListQuery;

use crate::context;
use crate::render::render_event_row;
use crate::utils::tui::create_spinner;

pub async fn run(date: &str) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let ymd = normalize_date(date);
    let day = parse_ymd(&ymd)?;

    // Fetching only the day would miss multi-day events that started
    // earlier; widen the window and filter on the span instead.
    let query = EventListQuery {
        start: (day - chrono::Duration::days(super::SPAN_LOOKBACK_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
        end: ymd.clone(),
        q: None,
    };

    let spinner = create_spinner("Loading day...");
    let events = ctx.client.list_events(&query).await;
    spinner.finish_and_clear();

    let mut events = events?;
    events.retain(|e| e.date_ymd() <= ymd && ymd <= e.end_date_ymd());
    events.sort_by(|a, b| a.start_time.cmp(&b.start_time));

    println!("{}", format_date_label(&ymd).bold());
    if is_weekend(&ymd) {
        println!("   {}", "Weekend (locked for scheduling)".dimmed());
    }
    for holiday in holidays_in_range(day, day) {
        println!("   {}", format!("Holiday: {}", holiday.name).red());
    }
    if events.is_empty() {
        println!("   {}", "No events on this day.".dimmed());
        return Ok(());
    }
    for event in &events {
        println!("   {}", render_event_row(event, now));
    }
    Ok(())
}
