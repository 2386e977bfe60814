//! Upload the post-event document (minutes or after-activity report).

use std::path::Path;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::status::is_done;

use crate::context;
use crate::utils::tui::create_spinner;

pub async fn run(id: i64, file: &Path) -> Result<()> {
    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Loading event...");
    let event = ctx.client.get_event(id).await;
    spinner.finish_and_clear();
    let event = event?;

    if event.created_by != ctx.user.id {
        bail!("Only the host can upload the {}.", event.post_document_label());
    }
    if !event.post_document_required {
        bail!("This event does not require a post-event document.");
    }
    if !is_done(&event, now) {
        bail!(
            "The {} can only be uploaded after the event is done.",
            event.post_document_label()
        );
    }

    let spinner = create_spinner("Uploading...");
    let result = ctx.client.upload_post_document(event.id, file).await;
    spinner.finish_and_clear();

    let updated = result?;
    println!(
        "{}",
        format!(
            "  Uploaded the {} for #{} ({} on file).",
            updated.post_document_label(),
            updated.id,
            updated.post_documents().count()
        )
        .green()
    );
    Ok(())
}
