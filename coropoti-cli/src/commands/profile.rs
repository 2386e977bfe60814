//! Office profile: show, save, remove.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use coropoti_core::user::Profile;

use crate::context;
use crate::utils::tui::create_spinner;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show a stored profile (yours by default)
    Show {
        /// Account id of another office
        #[arg(long)]
        user: Option<i64>,
    },
    /// Update profile fields
    Save {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        middle_name: Option<String>,

        #[arg(long)]
        designation: Option<String>,

        #[arg(long)]
        office: Option<String>,

        #[arg(long)]
        division: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        province: Option<String>,

        #[arg(long)]
        district: Option<String>,

        #[arg(long)]
        region: Option<String>,

        /// Profile picture to upload
        #[arg(long)]
        picture: Option<PathBuf>,
    },
    /// Remove the stored profile
    Remove,
}

pub async fn run(action: Option<ProfileAction>) -> Result<()> {
    match action.unwrap_or(ProfileAction::Show { user: None }) {
        ProfileAction::Show { user } => show(user).await,
        ProfileAction::Save {
            first_name,
            last_name,
            middle_name,
            designation,
            office,
            division,
            phone,
            province,
            district,
            region,
            picture,
        } => {
            let fields = [
                ("first_name", first_name),
                ("last_name", last_name),
                ("middle_name", middle_name),
                ("designation", designation),
                ("office", office),
                ("division", division),
                ("phone", phone),
                ("province", province),
                ("district", district),
                ("region", region),
            ]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect();
            save(fields, picture).await
        }
        ProfileAction::Remove => remove().await,
    }
}

async fn show(user: Option<i64>) -> Result<()> {
    let ctx = context::authed().await?;

    let spinner = create_spinner("Loading profile...");
    let profile = match user {
        Some(id) => ctx.client.profile_of(id).await,
        None => ctx.client.profile_me().await,
    };
    spinner.finish_and_clear();
    let profile = profile?;

    println!("{}", "Profile".bold());
    if user.is_none() {
        println!("   Account: {} <{}>", ctx.user.name, ctx.user.email);
    }
    let name = full_name(&profile);
    if !name.is_empty() {
        println!("   Name: {name}");
    }
    field("Designation", profile.designation.as_deref());
    field("Office", profile.office.as_deref());
    field("Division", profile.division.as_deref());
    field("Phone", profile.phone.as_deref());
    field("Region", profile.region.as_deref());
    field("Province", profile.province.as_deref());
    field("District", profile.district.as_deref());
    field("Picture", profile.picture.as_deref());
    Ok(())
}

async fn save(fields: Vec<(String, String)>, picture: Option<PathBuf>) -> Result<()> {
    let ctx = context::authed().await?;

    if fields.is_empty() && picture.is_none() {
        println!("   {}", "Nothing to save; pass at least one field.".dimmed());
        return Ok(());
    }

    let spinner = create_spinner("Saving profile...");
    let result = ctx.client.profile_save(fields, picture.as_deref()).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", "  Profile saved.".green());
    Ok(())
}

async fn remove() -> Result<()> {
    let ctx = context::authed().await?;

    let confirmed = Confirm::new()
        .with_prompt("  Remove the stored profile?")
        .default(false)
        .interact()?;
    if !confirmed {
        println!("   Nothing removed.");
        return Ok(());
    }

    let spinner = create_spinner("Removing profile...");
    let result = ctx.client.profile_remove().await;
    spinner.finish_and_clear();
    result?;

    println!("{}", "  Profile removed.".green());
    Ok(())
}

fn field(label: &str, value: Option<&str>) {
    if let Some(v) = value {
        if !v.is_empty() {
            println!("   {label}: {v}");
        }
    }
}

fn full_name(profile: &Profile) -> String {
    [
        profile.first_name.as_deref(),
        profile.middle_name.as_deref(),
        profile.last_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
