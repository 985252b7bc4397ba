//! Configuration management for coursewalk

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "COURSEWALK_API_URL";
/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "COURSEWALK_TOKEN";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the course API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token sent with API requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Pause after a finished quiz before moving to the next lesson
    #[serde(default = "default_auto_advance_delay_ms")]
    pub auto_advance_delay_ms: u64,

    /// HTTP request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_auto_advance_delay_ms() -> u64 {
    1500
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_token: None,
            auto_advance_delay_ms: default_auto_advance_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists.
    ///
    /// Environment overrides are applied afterwards and never written back.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Override settings from the environment
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "coursewalk")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_points_at_local_api() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.auto_advance_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{"api_base_url":"https://courses.example.com/api"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_base_url, "https://courses.example.com/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn token_is_not_serialized_when_absent() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("api_token"));
    }

    #[test]
    fn load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = Config { auto_advance_delay_ms: 250, ..Config::default() };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            API_URL_ENV => Some("https://remote/api".into()),
            TOKEN_ENV => Some("secret".into()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "https://remote/api");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config, Config::default());
    }
}
