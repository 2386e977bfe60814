//! Month grid with holidays and an active-conflicts panel.
//!
//! Each cell shows the day number and how many events touch it.
//! Weekends render dimmed (locked for scheduling), holidays red, and
//! today is highlighted. Multi-day events count on every day they span.

use anyhow::{Result, bail};
use chrono::{Datelike, Duration, NaiveDate};
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::conflict::reduce_conflicts;
use coropoti_core::event::Event;
use coropoti_core::holiday::holidays_in_range;
use coropoti_core::protocol::EventListQuery;

use crate::context;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn run(month: Option<&str>) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let (year, month) = match month {
        Some(raw) => parse_year_month(raw)?,
        None => (now.year(), now.month()),
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid month"))?;
    let last = last_day_of_month(first);

    let query = EventListQuery {
        // Widen backwards so multi-day spans reaching into this month count.
        start: (first - Duration::days(super::SPAN_LOOKBACK_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
        end: last.format("%Y-%m-%d").to_string(),
        q: None,
    };

    let spinner = create_spinner("Loading calendar...");
    let events = ctx.client.list_events(&query).await;
    let conflicts = ctx.client.conflicts_list().await;
    spinner.finish_and_clear();

    let events = events?;
    // Conflicts are a side panel; don't fail the grid over them.
    let conflicts = conflicts.unwrap_or_default();

    let holidays = holidays_in_range(first, last);

    println!("{}", first.format("%B %Y").to_string().bold());
    println!("   Sun   Mon   Tue   Wed   Thu   Fri   Sat");

    let mut line = String::new();
    // Weeks start on Sunday.
    for _ in 0..first.weekday().num_days_from_sunday() {
        line.push_str("      ");
    }
    let mut day = first;
    while day <= last {
        let count = events.iter().filter(|e| covers(e, day)).count();
        line.push_str(&render_cell(day, count, now.date(), &holidays));
        if day.weekday().num_days_from_sunday() == 6 {
            println!("{line}");
            line.clear();
        }
        day += Duration::days(1);
    }
    if !line.is_empty() {
        println!("{line}");
    }

    if !holidays.is_empty() {
        println!();
        for holiday in &holidays {
            println!(
                "   {} {}",
                holiday.date.format("%b %d").to_string().red(),
                holiday.name
            );
        }
    }

    let active = reduce_conflicts(&conflicts, now);
    let in_month: Vec<_> = active
        .iter()
        .filter(|row| row.event_date.starts_with(&format!("{year}-{month:02}")))
        .collect();
    if !in_month.is_empty() {
        println!();
        println!("  {}", "Conflicts this month".yellow().bold());
        for row in in_month {
            println!("   {}", row.render());
        }
    }

    println!();
    println!(
        "   {}",
        "Weekends are locked for scheduling. Run `coropoti legend` for office colors.".dimmed()
    );
    Ok(())
}

fn render_cell(
    day: NaiveDate,
    count: usize,
    today: NaiveDate,
    holidays: &[coropoti_core::holiday::Holiday],
) -> String {
    let marker = match count {
        0 => "  ".to_string(),
        1..=9 => format!("·{count}"),
        _ => "·+".to_string(),
    };
    let cell = format!("{:>4}{}", day.day(), marker);
    let weekend = matches!(
        day.weekday(),
        chrono::Weekday::Sat | chrono::Weekday::Sun
    );
    if day == today {
        cell.bold().reversed().to_string()
    } else if holidays.iter().any(|h| h.date == day) {
        cell.red().to_string()
    } else if weekend {
        cell.dimmed().to_string()
    } else {
        cell
    }
}

fn covers(event: &Event, day: NaiveDate) -> bool {
    let ymd = day.format("%Y-%m-%d").to_string();
    event.date_ymd() <= ymd && ymd <= event.end_date_ymd()
}

fn parse_year_month(raw: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = raw.splitn(2, '-').collect();
    let parsed = match parts.as_slice() {
        [y, m] => y
            .parse::<i32>()
            .ok()
            .zip(m.parse::<u32>().ok())
            .filter(|(_, m)| (1..=12).contains(m)),
        _ => None,
    };
    match parsed {
        Some(pair) => Ok(pair),
        None => bail!("Expected a month like 2025-06, got \"{raw}\""),
    }
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|d| d - Duration::days(1))
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_year_month() {
        assert_eq!(parse_year_month("2025-06").unwrap(), (2025, 6));
        assert!(parse_year_month("2025-13").is_err());
        assert!(parse_year_month("june").is_err());
    }

    #[test]
    fn month_end_handles_december() {
        let first = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(
            last_day_of_month(first),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(
            last_day_of_month(feb),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
