//! Configuration APIs for algometer
//!
//! Two configuration types cover everything the crate can be tuned with:
//!
//! - [`ContainerConfig`]: initial capacity and load factor for the containers
//! - [`AnalyzerConfig`]: size schedule and sampling counts for the complexity analyzer
//!
//! Both implement the [`Config`] trait, which provides validation, environment
//! initialization, presets, and JSON file persistence.
//!
//! ```rust
//! use algometer::config::{AnalyzerConfig, Config};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalyzerConfig::builder()
//!     .min_size(64)
//!     .max_size(4096)
//!     .iterations(7)
//!     .build()?;
//! assert_eq!(config.size_schedule().len(), 7);
//!
//! // Initialize from environment variables with the ALGOMETER_ prefix
//! let from_env = AnalyzerConfig::from_env()?;
//! assert!(from_env.validate().is_ok());
//! # Ok(())
//! # }
//! ```

use crate::error::{AlgometerError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::fmt;
use std::path::Path;

pub mod analyzer;
pub mod container;


pub use analyzer::{AnalyzerConfig, AnalyzerConfigBuilder};
pub use container::{ContainerConfig, MIN_LOAD_FACTOR};

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "ALGOMETER_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Variables use the format `ALGOMETER_{COMPONENT}_{FIELD}`, for example
    /// `ALGOMETER_ANALYZER_ITERATIONS=9`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset tuned for throughput, trading memory or precision for speed.
    fn performance_preset() -> Self;

    /// Preset tuned for a small footprint.
    fn memory_preset() -> Self;

    /// Preset tuned for low, predictable latency.
    fn realtime_preset() -> Self;

    /// Balanced preset, the default configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load configuration from a file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Configuration validation error details.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// The invalid value
    pub value: String,
    /// Description of why the value is invalid
    pub reason: String,
    /// Suggested valid values or ranges
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(field: &str, value: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
            suggestion: None,
        }
    }

    /// Add a suggestion for valid values.
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid configuration for field '{}': value '{}' is invalid ({})",
            self.field, self.value, self.reason
        )?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". Suggested values: {}", suggestion)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AlgometerError {
    fn from(err: ValidationError) -> Self {
        AlgometerError::configuration(err.to_string())
    }
}

/// Parse an environment variable, falling back to `default` when unset or unparsable.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn save_json<T: Serialize, P: AsRef<Path>>(config: &T, path: P, kind: &str) -> Result<()> {
    let serialized = serde_json::to_string_pretty(config).map_err(|e| {
        AlgometerError::configuration(format!("Failed to serialize {} config: {}", kind, e))
    })?;
    std::fs::write(path, serialized).map_err(|e| {
        AlgometerError::configuration(format!("Failed to write {} config file: {}", kind, e))
    })
}

pub(crate) fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P, kind: &str) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AlgometerError::configuration(format!("Failed to read {} config file: {}", kind, e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AlgometerError::configuration(format!("Failed to parse {} config file: {}", kind, e))
    })
}
