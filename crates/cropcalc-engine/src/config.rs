//! Engine tunables and their YAML loader.
//!
//! Every field has a default matching the behaviour of the stock crop
//! calculator, so an empty document (or no document at all) is a valid
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Numeric limits and conversion constants used by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tolerance for probability comparisons (default: 1e-9).
    ///
    /// A self-loop within this distance of 1 is treated as certain, and the
    /// drop-count expansion stops once the remaining tail is below it.
    #[serde(default = "default_probability_tolerance")]
    pub probability_tolerance: f64,

    /// How far a drop table's probabilities may sum away from 1
    /// (default: 1e-6). Hand-written tables use rounded decimals.
    #[serde(default = "default_drop_weight_tolerance")]
    pub drop_weight_tolerance: f64,

    /// Longest stage, in growth points, the solver accepts
    /// (default: 1 000 000).
    #[serde(default = "default_max_stage_duration")]
    pub max_stage_duration: u32,

    /// Largest drop count the drop-count expansion will emit
    /// (default: 100 000).
    #[serde(default = "default_max_drop_count")]
    pub max_drop_count: u32,

    /// Growth ticks per reporting time unit (default: 281.25).
    ///
    /// A growth tick fires every 256 world ticks and the world runs at 20
    /// ticks per second, so the default reports per real-time hour.
    #[serde(default = "default_ticks_per_time_unit")]
    pub ticks_per_time_unit: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            probability_tolerance: default_probability_tolerance(),
            drop_weight_tolerance: default_drop_weight_tolerance(),
            max_stage_duration: default_max_stage_duration(),
            max_drop_count: default_max_drop_count(),
            ticks_per_time_unit: default_ticks_per_time_unit(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

const fn default_probability_tolerance() -> f64 {
    1e-9
}

const fn default_drop_weight_tolerance() -> f64 {
    1e-6
}

const fn default_max_stage_duration() -> u32 {
    1_000_000
}

const fn default_max_drop_count() -> u32 {
    100_000
}

const fn default_ticks_per_time_unit() -> f64 {
    // 3600 s / (256 world ticks / 20 ticks per second)
    281.25
}
