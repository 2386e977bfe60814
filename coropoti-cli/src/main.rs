mod client;
mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coropoti")]
#[command(about = "Terminal client for the COROPOTI centralized schedule management system")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the COROPOTI backend
    Login {
        /// Office email (prompted when omitted)
        email: Option<String>,
    },
    /// Drop the stored session
    Logout,
    /// Register a new office account
    Register,
    /// Show the logged-in account
    Whoami,
    /// Today's schedule plus what's next
    Dashboard {
        /// Keep the view open, re-deriving status labels every 60s
        #[arg(long)]
        watch: bool,
    },
    /// Upcoming events (including today if not finished)
    Upcoming {
        /// Text filter over title/location/description
        #[arg(short, long)]
        query: Option<String>,

        /// Only events hosted by this account id
        #[arg(long)]
        host: Option<i64>,
    },
    /// Recently finished events
    Recent {
        /// How many days back to look
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
    /// All events of a year, grouped by month
    Year {
        /// Year (defaults to the current one)
        year: Option<i32>,
    },
    /// One day's events
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Pending invitations that need your response
    Invitations,
    /// Month grid with conflicts panel and cluster legend
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current one)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Full event detail, responses and history
    Show {
        /// Event id
        id: i64,
    },
    /// Create an event (prompts for missing fields)
    New {
        title: Option<String>,

        /// Start date (YYYY-MM-DD or natural language, e.g. "next monday")
        #[arg(short, long)]
        date: Option<String>,

        /// End date for multi-day events (defaults to the start date)
        #[arg(long)]
        end_date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long, default_value = "09:00")]
        start: String,

        /// End time (HH:MM)
        #[arg(long, default_value = "10:00")]
        end: String,

        /// Event type: meeting, zoom or event
        #[arg(short = 't', long = "type", default_value = "meeting")]
        event_type: String,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Mark the schedule as tentative
        #[arg(long)]
        tentative: bool,

        /// Note shown with the tentative marker
        #[arg(long)]
        tentative_note: Option<String>,

        /// Invite these account ids
        #[arg(long, value_delimiter = ',')]
        attendees: Vec<i64>,

        /// File to attach on creation
        #[arg(long)]
        attachment: Option<std::path::PathBuf>,
    },
    /// Edit an event
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,

        /// Replace the invited account ids
        #[arg(long, value_delimiter = ',')]
        attendees: Option<Vec<i64>>,
    },
    /// Move an event to another date/time (admins confirm with a reason)
    Move {
        id: i64,

        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// New start time (keeps the stored one when omitted)
        #[arg(long)]
        start: Option<String>,

        /// New end time (keeps the stored one when omitted)
        #[arg(long)]
        end: Option<String>,
    },
    /// Respond to an invitation
    Rsvp {
        id: i64,

        /// Accept, naming your representative
        #[arg(long, conflicts_with = "decline")]
        accept: bool,

        /// Decline with a reason
        #[arg(long)]
        decline: bool,

        /// Representative name (required when accepting)
        #[arg(long)]
        representative: Option<String>,

        /// Decline reason (required when declining)
        #[arg(long)]
        reason: Option<String>,
    },
    /// Cancel an event, or cancel-and-reschedule it (admin only)
    Cancel {
        id: i64,

        /// Reason (optional for plain cancel)
        #[arg(long)]
        reason: Option<String>,

        /// Reschedule instead of a plain cancel
        #[arg(long)]
        reschedule: bool,

        /// New start date (required with --reschedule)
        #[arg(long)]
        date: Option<String>,

        /// New end date (defaults to the new start date)
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Delete an event (host or admin, before completion)
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Upload the post-event document (host only, after the event is done)
    UploadDoc {
        id: i64,
        file: std::path::PathBuf,
    },
    /// Current conflicts (deduplicated, finished pairs hidden)
    Conflicts {
        /// Every office's conflicts, not just yours
        #[arg(long)]
        all: bool,
    },
    /// Cluster and office legend colors
    Legend,
    /// Show, update or remove your profile
    Profile {
        #[command(subcommand)]
        action: Option<commands::profile::ProfileAction>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { email } => commands::auth::login(email).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Register => commands::auth::register().await,
        Commands::Whoami => commands::auth::whoami().await,
        Commands::Dashboard { watch } => commands::dashboard::run(watch).await,
        Commands::Upcoming { query, host } => commands::upcoming::run(query, host).await,
        Commands::Recent { days } => commands::recent::run(days).await,
        Commands::Year { year } => commands::year::run(year).await,
        Commands::Day { date } => commands::day::run(&date).await,
        Commands::Invitations => commands::invitations::run().await,
        Commands::Calendar { month } => commands::calendar::run(month.as_deref()).await,
        Commands::Show { id } => commands::show::run(id).await,
        Commands::New {
            title,
            date,
            end_date,
            start,
            end,
            event_type,
            location,
            description,
            tentative,
            tentative_note,
            attendees,
            attachment,
        } => {
            commands::new::run(commands::new::NewArgs {
                title,
                date,
                end_date,
                start,
                end,
                event_type,
                location,
                description,
                tentative,
                tentative_note,
                attendees,
                attachment,
            })
            .await
        }
        Commands::Edit {
            id,
            title,
            date,
            start,
            end,
            location,
            description,
            color,
            attendees,
        } => {
            commands::edit::run(commands::edit::EditArgs {
                id,
                title,
                date,
                start,
                end,
                location,
                description,
                color,
                attendees,
            })
            .await
        }
        Commands::Move { id, date, start, end } => {
            commands::move_event::run(id, &date, start, end).await
        }
        Commands::Rsvp {
            id,
            accept,
            decline,
            representative,
            reason,
        } => commands::rsvp::run(id, accept, decline, representative, reason).await,
        Commands::Cancel {
            id,
            reason,
            reschedule,
            date,
            end_date,
        } => commands::cancel::run(id, reason, reschedule, date, end_date).await,
        Commands::Delete { id, yes } => commands::delete::run(id, yes).await,
        Commands::UploadDoc { id, file } => commands::upload::run(id, &file).await,
        Commands::Conflicts { all } => commands::conflicts::run(all).await,
        Commands::Legend => commands::legend::run().await,
        Commands::Profile { action } => commands::profile::run(action).await,
    }
}
