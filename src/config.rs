//! Configuration management for TextFlow
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TextflowError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for TextFlow
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Dashboard rendering settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Backend server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the analysis service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Override for the session file; defaults to the user data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Dashboard rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of characters of search hit content to show
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_preview_chars() -> usize {
    300
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preview_chars: default_preview_chars(),
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
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
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

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TextflowError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TextflowError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("TEXTFLOW_SERVER_URL") {
            tracing::debug!(base_url = %base_url, "Env override: TEXTFLOW_SERVER_URL");
            self.server.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("TEXTFLOW_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid TEXTFLOW_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(session_file) = std::env::var("TEXTFLOW_SESSION_FILE") {
            self.session.path = Some(PathBuf::from(session_file));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            self.server.base_url = server.clone();
        }
        if let Some(session_file) = &cli.session_file {
            self.session.path = Some(session_file.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `TextflowError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.server.base_url).map_err(|e| {
            TextflowError::Config(format!(
                "Invalid server base_url '{}': {}",
                self.server.base_url, e
            ))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TextflowError::Config(format!(
                "Server base_url must use http or https, got '{}'",
                parsed.scheme()
            ))
            .into());
        }

        if self.server.timeout_seconds == 0 {
            return Err(
                TextflowError::Config("timeout_seconds must be greater than 0".into()).into(),
            );
        }

        if self.server.timeout_seconds > 3600 {
            return Err(TextflowError::Config(
                "timeout_seconds must not exceed 3600 (1 hour)".into(),
            )
            .into());
        }

        if self.dashboard.preview_chars == 0 {
            return Err(
                TextflowError::Config("preview_chars must be greater than 0".into()).into(),
            );
        }

        Ok(())
    }
}
