//! User configuration for StagePass
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Paths;

/// User configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Server ID used for JWT secret and password salt
    #[serde(default)]
    pub server_id: String,

    /// Show user list on login page
    #[serde(default = "default_true")]
    pub users_on_login: bool,

    /// Allow unauthenticated guest browsing
    #[serde(default)]
    pub enable_guest: bool,

    /// Currency symbol used for displayed ticket prices
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            server_id: String::new(),
            users_on_login: true,
            enable_guest: false,
            currency: default_currency(),
        }
    }
}

impl UserConfig {
    /// Load configuration from file, creating it with defaults when missing
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&settings_path, content).context("Failed to write settings file")?;

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "$".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(config.users_on_login);
        assert!(!config.enable_guest);
        assert_eq!(config.currency, "$");
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = UserConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.users_on_login, deserialized.users_on_login);
    }
}
