//! Configuration management for ChaosChat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChaosChatError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for ChaosChat
///
/// This structure holds all configuration needed for the client,
/// including backend connection settings, chat behavior, and chaos
/// panel behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend connection configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Chat behavior configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Chaos panel configuration
    #[serde(default)]
    pub chaos: ChaosConfig,
}

/// Backend connection configuration
///
/// Specifies where the chat-demo backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend service
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Request timeout in seconds
    ///
    /// A non-responding backend surfaces as a transport error after this
    /// timeout; no separate timeout is enforced above the HTTP client.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_backend_url() -> String {
    "http://backend:8000".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Chat behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Delay before requesting a generated title for a new session (milliseconds)
    ///
    /// The backend persists the first exchange asynchronously; the delay
    /// gives it time to land before the title request reads it back.
    #[serde(default = "default_title_delay_ms")]
    pub title_delay_ms: u64,
}

fn default_title_delay_ms() -> u64 {
    1500
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            title_delay_ms: default_title_delay_ms(),
        }
    }
}

/// Chaos panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Interval between status polls while the panel is open (milliseconds)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    3000
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Load configuration from a YAML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or contains invalid YAML
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChaosChatError::Config(format!("Failed to read {}: {}", path, e)))?;
        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| ChaosChatError::Config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("CHAOSCHAT_BACKEND_URL") {
            self.backend.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("CHAOSCHAT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.backend.timeout_seconds = value;
            } else {
                tracing::warn!("Ignoring invalid CHAOSCHAT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(interval) = std::env::var("CHAOSCHAT_POLL_INTERVAL_MS") {
            if let Ok(value) = interval.parse() {
                self.chaos.poll_interval_ms = value;
            } else {
                tracing::warn!("Ignoring invalid CHAOSCHAT_POLL_INTERVAL_MS: {}", interval);
            }
        }

        if let Ok(delay) = std::env::var("CHAOSCHAT_TITLE_DELAY_MS") {
            if let Ok(value) = delay.parse() {
                self.chat.title_delay_ms = value;
            } else {
                tracing::warn!("Ignoring invalid CHAOSCHAT_TITLE_DELAY_MS: {}", delay);
            }
        }
    }

    /// Apply CLI argument overrides
    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(backend) = &cli.backend {
            self.backend.base_url = backend.clone();
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.backend.base_url.is_empty() {
            return Err(
                ChaosChatError::Config("backend.base_url cannot be empty".to_string()).into(),
            );
        }

        let parsed = url::Url::parse(&self.backend.base_url).map_err(|e| {
            ChaosChatError::Config(format!(
                "backend.base_url is not a valid URL: {}: {}",
                self.backend.base_url, e
            ))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ChaosChatError::Config(format!(
                "backend.base_url must be http or https, got: {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.backend.timeout_seconds == 0 {
            return Err(ChaosChatError::Config(
                "backend.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chaos.poll_interval_ms == 0 {
            return Err(ChaosChatError::Config(
                "chaos.poll_interval_ms must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
