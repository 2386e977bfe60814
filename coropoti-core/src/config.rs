//! Global client configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityMap;
use crate::error::{CoropotiError, CoropotiResult};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001/api";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Global configuration at ~/.config/coropoti/config.toml
#[derive(Serialize, Deserialize, Clone)]
pub struct CoropotiConfig {
    /// Base URL of the COROPOTI REST backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Office accounts restricted to view/create (no edit/delete/move).
    #[serde(default)]
    pub read_only_offices: Vec<String>,
}

impl Default for CoropotiConfig {
    fn default() -> Self {
        CoropotiConfig {
            server_url: default_server_url(),
            read_only_offices: Vec::new(),
        }
    }
}

impl CoropotiConfig {
    pub fn config_dir() -> CoropotiResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CoropotiError::Config("Could not determine config directory".into()))?
            .join("coropoti");
        Ok(dir)
    }

    pub fn config_path() -> CoropotiResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> CoropotiResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: CoropotiConfig = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .build()
            .map_err(|e| CoropotiError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CoropotiError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Save the current config to ~/.config/coropoti/config.toml
    pub fn save(&self) -> CoropotiResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| CoropotiError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| CoropotiError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CoropotiResult<()> {
        let contents = format!(
            "\
# coropoti configuration

# COROPOTI backend base URL:
# server_url = \"{DEFAULT_SERVER_URL}\"

# Office accounts restricted to view/create only:
# read_only_offices = [\"romo@example.gov\", \"po@example.gov\"]
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoropotiError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CoropotiError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The capability table driven by the read-only office list.
    pub fn capabilities(&self) -> CapabilityMap {
        CapabilityMap::read_only_offices(&self.read_only_offices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = CoropotiConfig {
            server_url: "https://schedule.example.gov/api".into(),
            read_only_offices: vec!["romo@example.gov".into()],
        };
        let text = toml::to_string_pretty(&config).expect("serialize");
        let parsed: CoropotiConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.server_url, config.server_url);
        assert_eq!(parsed.read_only_offices, config.read_only_offices);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: CoropotiConfig = toml::from_str("").expect("parse empty");
        assert_eq!(parsed.server_url, DEFAULT_SERVER_URL);
        assert!(parsed.read_only_offices.is_empty());
    }

    #[test]
    fn read_only_offices_feed_the_capability_map() {
        let config = CoropotiConfig {
            server_url: default_server_url(),
            read_only_offices: vec!["romo@example.gov".into()],
        };
        let caps = config.capabilities();
        assert!(!caps.for_email("romo@example.gov").can_edit);
        assert!(caps.for_email("other@example.gov").can_edit);
    }
}
