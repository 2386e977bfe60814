//! Respond to an invitation.
//!
//! Accepting requires the representative's name, declining a reason.
//! A response is final: once an office has accepted or declined there is
//! no further transition, and responses lock once the event has started.

use anyhow::{Result, bail};
use dialoguer::Input;
use owo_colors::OwoColorize;

use coropoti_core::clock::{Clock, SystemClock};
use coropoti_core::event::{Rsvp, RsvpStatus};
use coropoti_core::protocol::RsvpRequest;
use coropoti_core::status::response_locked;

use crate::context;
use crate::utils::tui::create_spinner;

pub async fn run(
    id: i64,
    accept: bool,
    decline: bool,
    representative: Option<String>,
    reason: Option<String>,
) -> Result<()> {
    if accept == decline {
        bail!("Pass exactly one of --accept or --decline.");
    }

    let ctx = context::authed().await?;
    let now = SystemClock.now();

    let spinner = create_spinner("Loading event...");
    let event = ctx.client.get_event(id).await;
    spinner.finish_and_clear();
    let event = event?;

    let Some(mine) = event.rsvp_for(ctx.user.id) else {
        bail!("Your office is not invited to this event.");
    };
    ensure_pending(mine)?;
    if response_locked(&event, now) {
        bail!("This event has already started; responses are locked.");
    }

    let representative = match (accept, representative) {
        (true, Some(name)) if !name.trim().is_empty() => Some(name),
        (true, _) => Some(
            Input::new()
                .with_prompt("  Name of the representative attending")
                .interact_text()?,
        ),
        (false, _) => None,
    };
    let reason = match (decline, reason) {
        (true, Some(r)) if !r.trim().is_empty() => Some(r),
        (true, _) => Some(
            Input::new()
                .with_prompt("  Reason for declining")
                .interact_text()?,
        ),
        (false, _) => None,
    };
    let request = build_request(accept, representative, reason)?;

    let spinner = create_spinner("Sending response...");
    let result = ctx.client.rsvp(event.id, &request).await;
    spinner.finish_and_clear();
    result?;

    let verb = if accept { "Accepted" } else { "Declined" };
    println!(
        "{}",
        format!("  {verb} the invitation to \"{}\"", event.title).green()
    );
    Ok(())
}

/// A pending row is the only state that may still respond.
fn ensure_pending(rsvp: &Rsvp) -> Result<()> {
    if rsvp.status != RsvpStatus::Pending {
        bail!(
            "You have already responded ({}); responses are final.",
            rsvp.status.label().to_lowercase()
        );
    }
    Ok(())
}

/// Accepting needs a representative name and declining needs a reason;
/// both checks run before any request leaves the client.
fn build_request(
    accept: bool,
    representative: Option<String>,
    reason: Option<String>,
) -> Result<RsvpRequest> {
    if accept {
        let representative = representative
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("A representative name is required to accept."))?;
        Ok(RsvpRequest {
            status: RsvpStatus::Accepted,
            representative_name: Some(representative),
            decline_reason: None,
        })
    } else {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("A reason is required to decline."))?;
        Ok(RsvpRequest {
            status: RsvpStatus::Declined,
            representative_name: None,
            decline_reason: Some(reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rsvp_row(status: RsvpStatus) -> Rsvp {
        Rsvp {
            office_user_id: 7,
            office_name: Some("Planning Office".into()),
            status,
            representative_name: None,
            decline_reason: None,
            responded_at: None,
        }
    }

    #[test]
    fn responses_are_final_once_given() {
        assert!(ensure_pending(&rsvp_row(RsvpStatus::Pending)).is_ok());

        let err = ensure_pending(&rsvp_row(RsvpStatus::Accepted)).unwrap_err();
        assert!(err.to_string().contains("already responded"));
        assert!(ensure_pending(&rsvp_row(RsvpStatus::Declined)).is_err());
    }

    #[test]
    fn accept_requires_a_representative() {
        assert!(build_request(true, None, None).is_err());
        assert!(build_request(true, Some("  ".into()), None).is_err());
        let req = build_request(true, Some("J. Dela Cruz".into()), None).unwrap();
        assert_eq!(req.status, RsvpStatus::Accepted);
    }

    #[test]
    fn decline_requires_a_reason() {
        assert!(build_request(false, None, None).is_err());
        let req = build_request(false, None, Some("Schedule clash".into())).unwrap();
        assert_eq!(req.status, RsvpStatus::Declined);
        assert_eq!(req.decline_reason.as_deref(), Some("Schedule clash"));
    }
}
