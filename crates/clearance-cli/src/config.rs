//! CLI configuration
//!
//! Read from TOML, then overridden by `CLEARANCE_*` environment variables.
//! A missing file is not an error; every field has a default.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

const ENV_STORE_PATH: &str = "CLEARANCE_STORE_PATH";
const ENV_LOG_LEVEL: &str = "CLEARANCE_LOG_LEVEL";
const ENV_ADMIN_USERNAME: &str = "CLEARANCE_ADMIN_USERNAME";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings shared by every subcommand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Principal snapshot file
    pub store_path: PathBuf,
    /// Default log level when neither `--verbose` nor `CLEARANCE_LOG` is set
    pub log_level: String,
    /// Log audit events through `tracing`
    pub audit: bool,
    /// Admin seeded by `init` and used when `--as` is omitted
    pub admin_username: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".clearance/principals.json"),
            log_level: "info".to_string(),
            audit: true,
            admin_username: "admin".to_string(),
        }
    }
}

impl CliConfig {
    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply `CLEARANCE_*` overrides from the process environment
    pub fn merge_with_env(self) -> Self {
        self.merge_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn merge_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_STORE_PATH) {
            self.store_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(username) = lookup(ENV_ADMIN_USERNAME) {
            self.admin_username = username;
        }
        self
    }

    /// Reject settings no subcommand can work with
    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            bail!("store_path must not be empty");
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!(
                "Unknown log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }
        if self.admin_username.trim().is_empty() {
            bail!("admin_username must not be empty");
        }
        Ok(())
    }
}
