//! Year view: every event of a year, grouped by month.

use anyhow::Result;
use chrono::Datelike;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::protocol::EventListQuery;

use crate::context;
use crate::render::render_event_row;
use crate::utils::tui::create_spinner;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub async fn run(year: Option<i32>) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();
    let year = year.unwrap_or_else(|| now.year());

    let query = EventListQuery {
        start: format!("{year}-01-01"),
        end: format!("{year}-12-31"),
        q: None,
    };

    let spinner = create_spinner(format!("Loading {year}..."));
    let events = ctx.client.list_events(&query).await;
    spinner.finish_and_clear();

    let mut events = events?;
    events.sort_by(|a, b| {
        (a.date_ymd(), a.start_time.clone()).cmp(&(b.date_ymd(), b.start_time.clone()))
    });

    println!("{}", year.to_string().bold());
    if events.is_empty() {
        println!("   {}", "No events this year.".dimmed());
        return Ok(());
    }

    for (index, name) in MONTH_NAMES.iter().enumerate() {
        let prefix = format!("{year}-{:02}", index + 1);
        let of_month: Vec<_> = events
            .iter()
            .filter(|e| e.date_ymd().starts_with(&prefix))
            .collect();
        if of_month.is_empty() {
            continue;
        }
        println!();
        println!("  {}", name.bold().underline());
        for event in of_month {
            println!("   {}", render_event_row(event, now));
        }
    }
    println!();
    println!("   {}", format!("{} event(s)", events.len()).dimmed());
    Ok(())
}
