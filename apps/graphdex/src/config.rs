//! # Client Configuration
//!
//! Resolution order, later wins:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, or `graphdex.toml` in the working directory)
//! 3. Environment: `GRAPHDEX_URL`, `GRAPHDEX_API_KEY`, `GRAPHDEX_USERNAME`,
//!    `GRAPHDEX_PASSWORD`, `GRAPHDEX_TIMEOUT_SECS`
//! 4. Command-line flags
//!
//! ```toml
//! url = "http://localhost:7474/db/data/"
//! username = "neo4j"
//! password = "secret"
//! timeout_secs = 30
//! ```

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file picked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "graphdex.toml";

/// Service root used when nothing else is configured.
pub const DEFAULT_URL: &str = "http://localhost:7474/db/data/";

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

/// Connection settings for one graph database server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Service root URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Bearer token, sent as `Authorization: Bearer <key>`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Basic auth user; requires `password`.
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            username: None,
            password: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
            .map_err(|e| AppError::config(format!("{}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        toml::from_str(content).map_err(|e| AppError::config(format!("Invalid config TOML: {e}")))
    }

    /// Load an explicit file, or the default file if it exists, or defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, AppError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    tracing::debug!("Using config file {}", DEFAULT_CONFIG_FILE);
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), AppError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GRAPHDEX_URL") {
            self.url = url;
        }
        if let Some(key) = lookup("GRAPHDEX_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(user) = lookup("GRAPHDEX_USERNAME") {
            self.username = Some(user);
        }
        if let Some(password) = lookup("GRAPHDEX_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(raw) = lookup("GRAPHDEX_TIMEOUT_SECS") {
            let secs = raw.parse().map_err(|_| {
                AppError::config(format!("GRAPHDEX_TIMEOUT_SECS must be an integer, got '{raw}'"))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Check that the settings can produce a working client.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = url::Url::parse(&self.url)
            .map_err(|e| AppError::config(format!("Invalid url '{}': {e}", self.url)))?;
        if url.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "Invalid url '{}': not a hierarchical URL",
                self.url
            )));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(AppError::config(
                "username and password must be given together",
            ));
        }
        if self.api_key.is_some() && self.username.is_some() {
            return Err(AppError::config(
                "api_key and username/password are mutually exclusive",
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(AppError::config("timeout_secs must be > 0"));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
