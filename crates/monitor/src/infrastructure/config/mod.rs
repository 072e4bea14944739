//! Configuration loading for the compliance monitor
//!
//! A single JSON file covers:
//! - Server bind address
//! - The holding period the detector enforces
//! - The bearer tokens accepted by the API and what each may do

use serde::{Deserialize, Serialize};
use std::path::Path;
use tcm_matching::{DEFAULT_HOLDING_PERIOD_DAYS, HoldingPeriodRule};
use thiserror::Error;

use crate::application::ports::Permission;

/// Root configuration of the monitor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub holding_period: HoldingPeriodConfig,

    /// Accepted bearer tokens
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

impl MonitorConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.holding_period.max_days <= 0 {
            return Err(ConfigError::InvalidHoldingPeriod(
                self.holding_period.max_days,
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.tokens {
            if entry.token.trim().is_empty() {
                return Err(ConfigError::InvalidToken(format!(
                    "empty token for '{}'",
                    entry.email
                )));
            }
            if !seen.insert(entry.token.as_str()) {
                return Err(ConfigError::InvalidToken(format!(
                    "duplicate token for '{}'",
                    entry.email
                )));
            }
        }
        Ok(())
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingPeriodConfig {
    /// Round trips closed in fewer days than this are violations
    #[serde(default = "default_max_days")]
    pub max_days: i64,
}

fn default_max_days() -> i64 {
    DEFAULT_HOLDING_PERIOD_DAYS
}

impl Default for HoldingPeriodConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
        }
    }
}

impl HoldingPeriodConfig {
    pub fn rule(&self) -> HoldingPeriodRule {
        HoldingPeriodRule::new(self.max_days)
    }

    /// The configured rule, or one enforcing `max_days` when given
    pub fn rule_or(&self, max_days: Option<i64>) -> Result<HoldingPeriodRule, ConfigError> {
        match max_days {
            Some(days) if days <= 0 => Err(ConfigError::InvalidHoldingPeriod(days)),
            Some(days) => Ok(HoldingPeriodRule::new(days)),
            None => Ok(self.rule()),
        }
    }
}

/// One accepted bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub token: String,
    /// Identity the token authenticates as; trades are reported under it
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid holding period: {0} days")]
    InvalidHoldingPeriod(i64),

    #[error("Invalid token config: {0}")]
    InvalidToken(String),
}
