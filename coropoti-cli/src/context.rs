//! Shared command context.
//!
//! Most commands need the same setup: global config, the stored session,
//! an authenticated API client, and a fresh `GET /auth/me` so role and
//! capability checks never run against a stale cached account.

use anyhow::{Context as _, Result};

use coropoti_core::capability::CapabilityMap;
use coropoti_core::config::CoropotiConfig;
use coropoti_core::session::Session;
use coropoti_core::user::User;

use crate::client::ApiClient;

pub struct Ctx {
    pub client: ApiClient,
    pub user: User,
    pub capabilities: CapabilityMap,
}

/// Build an unauthenticated client (login/register).
pub fn anonymous() -> Result<ApiClient> {
    let config = CoropotiConfig::load()?;
    Ok(ApiClient::new(&config.server_url, None))
}

/// Build an authenticated context, refreshing the cached account.
pub async fn authed() -> Result<Ctx> {
    let config = CoropotiConfig::load()?;
    let mut session = Session::require()?;
    let client = ApiClient::new(&config.server_url, Some(session.token.clone()));

    let user = client
        .me()
        .await
        .context("Session is no longer valid. Run `coropoti login` again")?;

    // Keep the cached account current for offline display.
    session.user = Some(user.clone());
    session.save()?;

    Ok(Ctx {
        client,
        user,
        capabilities: config.capabilities(),
    })
}
