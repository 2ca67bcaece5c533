//! Configuration loading from TOML with fallbacks.

use std::path::{Path, PathBuf};

use proto::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI preferences.
    #[serde(default)]
    pub ui: UiConfig,

    /// Backend sender settings.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Which theme token set the UI starts with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Dark palette (default).
    #[default]
    Dark,
    /// Light palette.
    Light,
}

impl ThemeChoice {
    /// Returns the other theme.
    pub fn toggled(self) -> Self {
        match self {
            ThemeChoice::Dark => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::Dark,
        }
    }
}

/// UI preference configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Starting theme ("dark" or "light").
    #[serde(default)]
    pub theme: ThemeChoice,

    /// Whether the sidebar starts open.
    #[serde(default)]
    pub sidebar_open: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Dark,
            sidebar_open: false,
        }
    }
}

/// Backend sender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Artificial delay before the stub sender replies, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_reply_delay_ms() -> u64 {
    1000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

impl Config {
    /// Loads configuration from an explicit path or fallback locations.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(|p| p.to_path_buf()).or_else(|| {
            // Look in current dir, then home dir
            let cwd = std::env::current_dir().ok()?.join("config.toml");
            if cwd.exists() {
                return Some(cwd);
            }
            let home = std::env::var("HOME").ok()?;
            let home_config = PathBuf::from(home).join(".neurago").join("config.toml");
            if home_config.exists() {
                return Some(home_config);
            }
            None
        });
        debug!(path = ?config_path, "Config file resolved");

        let config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(|e| ConfigError::Toml(e.to_string()))?
        } else {
            Config::default()
        };

        Ok(config)
    }
}
