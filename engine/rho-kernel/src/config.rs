//! Configuration for the rho kernel

use crate::error::{Result, RhoError};
use crate::{DEFAULT_LOG_LEVEL, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Log formats accepted by [`LoggingConfig::format`]
pub const LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

/// Configuration for the rho calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RhoConfig {
    /// How out-of-domain inputs are surfaced
    #[serde(default)]
    pub domain_policy: DomainPolicy,

    /// Batch evaluation configuration
    #[serde(default)]
    pub batch: BatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How a negative radicand (or a non-finite input) is reported
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Return NaN exactly as IEEE arithmetic produces it
    #[default]
    PropagateNan,
    /// Return a `RhoError` domain error
    Reject,
}

/// Elementwise batch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchConfig {
    /// Allow batches to run on the rayon pool
    pub enable_parallel: bool,

    /// Minimum batch length evaluated in parallel
    pub parallel_threshold: usize,
}

/// Logging and tracing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    /// Output format: compact, pretty or json
    pub format: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { enable_parallel: true, parallel_threshold: DEFAULT_PARALLEL_THRESHOLD }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), format: "compact".to_string() }
    }
}

impl FromStr for DomainPolicy {
    type Err = RhoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate_nan" | "nan" => Ok(Self::PropagateNan),
            "reject" | "error" => Ok(Self::Reject),
            other => Err(RhoError::config(format!("unknown domain policy '{other}'"))),
        }
    }
}

impl BatchConfig {
    /// Whether a batch of `len` elements should be evaluated in parallel
    pub fn use_parallel(&self, len: usize) -> bool {
        self.enable_parallel && len >= self.parallel_threshold
    }
}

impl RhoConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RhoConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `RHO_*` environment variable overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(policy) = lookup("RHO_DOMAIN_POLICY") {
            self.domain_policy = policy.parse()?;
        }

        if let Some(parallel) = lookup("RHO_PARALLEL") {
            self.batch.enable_parallel = parallel
                .trim()
                .parse()
                .map_err(|_| RhoError::config(format!("RHO_PARALLEL: invalid bool '{parallel}'")))?;
        }

        if let Some(threshold) = lookup("RHO_PARALLEL_THRESHOLD") {
            self.batch.parallel_threshold = threshold.trim().parse().map_err(|_| {
                RhoError::config(format!("RHO_PARALLEL_THRESHOLD: invalid length '{threshold}'"))
            })?;
        }

        if let Some(level) = lookup("RHO_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("RHO_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.batch.parallel_threshold == 0 {
            return Err(RhoError::config("batch.parallel_threshold must be at least 1"));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(RhoError::config(format!(
                "logging.format '{}' is not one of {:?}",
                self.logging.format, LOG_FORMATS
            )));
        }
        Ok(())
    }
}
