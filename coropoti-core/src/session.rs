//! Persisted login session.
//!
//! The bearer token lives in a plain file next to the config; the cached
//! account is refreshed from `GET /auth/me` by the CLI whenever a command
//! needs the current user, so the cache is a convenience, not a source of
//! truth.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::CoropotiConfig;
use crate::error::{CoropotiError, CoropotiResult};
use crate::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    fn session_path() -> CoropotiResult<PathBuf> {
        Ok(CoropotiConfig::config_dir()?.join("session.json"))
    }

    /// Load the stored session, if one exists.
    pub fn load() -> CoropotiResult<Option<Session>> {
        let path = Self::session_path()?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let session = serde_json::from_str(&content)
            .map_err(|e| CoropotiError::Session(format!("Corrupt session file: {e}")))?;
        Ok(Some(session))
    }

    /// Load the stored session or fail with a login hint.
    pub fn require() -> CoropotiResult<Session> {
        Self::load()?.ok_or(CoropotiError::NotLoggedIn)
    }

    /// Persist this session.
    pub fn save(&self) -> CoropotiResult<()> {
        let path = Self::session_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CoropotiError::Serialization(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Drop the stored session (logout). Missing file is fine.
    pub fn clear() -> CoropotiResult<()> {
        let path = Self::session_path()?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
