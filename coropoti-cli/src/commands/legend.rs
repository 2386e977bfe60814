//! Cluster/office legend colors.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context;
use crate::utils::tui::create_spinner;

pub async fn run() -> Result<()> {
    let ctx = context::authed().await?;

    let spinner = create_spinner("Loading legend...");
    let clusters = ctx.client.legend_clusters().await;
    spinner.finish_and_clear();

    let clusters = clusters?;

    println!("{}", "Legend".bold());
    if clusters.is_empty() {
        // No cluster grouping configured; fall back to the flat office list.
        let offices = ctx.client.legend_offices().await?;
        if offices.is_empty() {
            println!("   {}", "No offices configured.".dimmed());
            return Ok(());
        }
        for office in &offices {
            println!("  {} {}", swatch(office.color.as_deref()), office.name);
            for division in &office.divisions {
                println!("     {}", division.dimmed());
            }
        }
        return Ok(());
    }
    for cluster in &clusters {
        println!();
        println!("  {} {}", swatch(cluster.color.as_deref()), cluster.name.bold());
        for office in &cluster.offices {
            println!("     {} {}", swatch(office.color.as_deref()), office.name);
            for division in &office.divisions {
                println!("        {}", division.dimmed());
            }
        }
    }
    Ok(())
}

/// Colored block for a `#rrggbb` value, or a plain one when it can't be
/// parsed (the terminal shows truecolor where supported).
fn swatch(hex: Option<&str>) -> String {
    match hex.and_then(parse_hex) {
        Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
        None => "■".dimmed().to_string(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::parse_hex;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(parse_hex("#3b82f6"), Some((0x3b, 0x82, 0xf6)));
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(parse_hex("3b82f6"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }
}
