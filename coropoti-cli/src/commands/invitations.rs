//! Pending invitations awaiting this office's response.

use anyhow::Result;
use owo_colors::OwoColorize;

use coropoti_core::datetime::{format_date_label, format_time_short, normalize_date};

use crate::context;
use crate::utils::tui::create_spinner;

pub async fn run() -> Result<()> {
    let ctx = context::authed().await?;

    let spinner = create_spinner("Loading invitations...");
    let invitations = ctx.client.invitations().await;
    spinner.finish_and_clear();

    let invitations = invitations?;

    println!("{}", "Pending invitations".bold());
    if invitations.is_empty() {
        println!("   {}", "Nothing waiting for your response.".dimmed());
        return Ok(());
    }
    for invite in &invitations {
        let mut line = format!(
            "{:>5}  {}  {}–{}  {}",
            format!("#{}", invite.event_id).dimmed(),
            format_date_label(&normalize_date(&invite.date)),
            format_time_short(&invite.start_time),
            format_time_short(&invite.end_time),
            invite.title.bold(),
        );
        if let Some(host) = invite.creator_name.as_deref() {
            line.push_str(&format!(" {}", format!("• hosted by {host}").dimmed()));
        }
        println!("   {line}");
    }
    println!();
    println!(
        "   {}",
        "Respond with `coropoti rsvp <id> --accept --representative <name>` or `--decline --reason <reason>`."
            .dimmed()
    );
    Ok(())
}
