//! Configuration system for fleetdispatch.
//!
//! Load dispatch configuration from TOML or YAML files to control the solve
//! time limit and the capacity-relaxation bounds without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use fleetdispatch_config::DispatchConfig;
//! use std::time::Duration;
//!
//! let config = DispatchConfig::from_toml_str(r#"
//!     solve_time_limit_ms = 5000
//!     max_relaxation_attempts = 4
//!     relaxation_growth = 2.0
//! "#).unwrap();
//!
//! assert_eq!(config.solve_time_limit(), Duration::from_secs(5));
//! assert_eq!(config.max_relaxation_attempts, 4);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use fleetdispatch_config::DispatchConfig;
//!
//! let config = DispatchConfig::load("dispatch.toml").unwrap_or_default();
//! // Proceeds with defaults if the file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main dispatch configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct DispatchConfig {
    /// Wall-clock limit for a single model solve, in milliseconds.
    #[serde(default = "default_solve_time_limit_ms")]
    pub solve_time_limit_ms: u64,

    /// Maximum number of build-and-solve attempts per round before the
    /// repair loop gives up with a relaxation-exhausted failure.
    #[serde(default = "default_max_relaxation_attempts")]
    pub max_relaxation_attempts: u32,

    /// Multiplier applied to the capacity relaxation factor after each
    /// non-optimal attempt.
    #[serde(default = "default_relaxation_growth")]
    pub relaxation_growth: f64,
}

fn default_solve_time_limit_ms() -> u64 {
    20_000
}

fn default_max_relaxation_attempts() -> u32 {
    8
}

fn default_relaxation_growth() -> f64 {
    2.0
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            solve_time_limit_ms: default_solve_time_limit_ms(),
            max_relaxation_attempts: default_max_relaxation_attempts(),
            relaxation_growth: default_relaxation_growth(),
        }
    }
}

impl DispatchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, contains invalid TOML,
    /// or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// The solve time limit as a `Duration`.
    pub fn solve_time_limit(&self) -> Duration {
        Duration::from_millis(self.solve_time_limit_ms)
    }

    /// Validates configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solve_time_limit_ms == 0 {
            return Err(ConfigError::Invalid("solve_time_limit_ms must be positive".into()));
        }
        if self.max_relaxation_attempts == 0 {
            return Err(ConfigError::Invalid("max_relaxation_attempts must be at least 1".into()));
        }
        if self.relaxation_growth <= 1.0 {
            return Err(ConfigError::Invalid("relaxation_growth must be greater than 1.0".into()));
        }
        Ok(())
    }
}
