//! Complexity analyzer configuration.

use super::{load_json, parse_env_var, save_json, Config, ValidationError};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default smallest input size
pub const DEFAULT_MIN_SIZE: usize = 100;
/// Default largest input size
pub const DEFAULT_MAX_SIZE: usize = 10_000;
/// Default geometric step between sizes
pub const DEFAULT_STEP_MULTIPLIER: usize = 2;
/// Default number of recorded runs per size
pub const DEFAULT_ITERATIONS: usize = 5;
/// Default number of discarded warm-up runs per size
pub const DEFAULT_WARMUP_ITERATIONS: usize = 3;

/// Size schedule and sampling counts for a complexity analysis pass.
///
/// Sizes run from `min_size` up to and including `max_size`, multiplying by
/// `step_multiplier` each round, so the number of points grows with the
/// logarithm of the covered range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// First input size
    pub min_size: usize,
    /// Inclusive upper bound on input sizes
    pub max_size: usize,
    /// Factor between consecutive sizes
    pub step_multiplier: usize,
    /// Recorded runs per size
    pub iterations: usize,
    /// Discarded runs per size before recording (time pass only)
    pub warmup_iterations: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            step_multiplier: DEFAULT_STEP_MULTIPLIER,
            iterations: DEFAULT_ITERATIONS,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
        }
    }
}

impl AnalyzerConfig {
    /// Create a configuration from the four schedule parameters.
    pub fn new(min_size: usize, max_size: usize, step_multiplier: usize, iterations: usize) -> Self {
        Self {
            min_size,
            max_size,
            step_multiplier,
            iterations,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
        }
    }

    /// Create a configuration builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }

    /// The input sizes this configuration visits, in order.
    pub fn size_schedule(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        if self.min_size == 0 || self.step_multiplier < 2 {
            return sizes;
        }

        let mut size = self.min_size;
        while size <= self.max_size {
            sizes.push(size);
            match size.checked_mul(self.step_multiplier) {
                Some(next) => size = next,
                None => break,
            }
        }
        sizes
    }
}

impl Config for AnalyzerConfig {
    fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            return Err(ValidationError::new("min_size", "0", "input sizes must be positive")
                .with_suggestion(">= 1")
                .into());
        }
        if self.max_size < self.min_size {
            return Err(ValidationError::new(
                "max_size",
                &self.max_size.to_string(),
                "max_size must not be smaller than min_size",
            )
            .into());
        }
        if self.step_multiplier < 2 {
            return Err(ValidationError::new(
                "step_multiplier",
                &self.step_multiplier.to_string(),
                "sizes must grow geometrically",
            )
            .with_suggestion("2 - 10")
            .into());
        }
        if self.iterations == 0 {
            return Err(ValidationError::new("iterations", "0", "at least one recorded run is needed")
                .with_suggestion("5 - 31")
                .into());
        }
        let points = self.size_schedule().len();
        if points < 2 {
            return Err(ValidationError::new(
                "max_size",
                &self.max_size.to_string(),
                &format!("size schedule yields {} point(s), classification needs 2", points),
            )
            .with_suggestion(&format!(">= {}", self.min_size.saturating_mul(self.step_multiplier)))
            .into());
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.min_size = parse_env_var(&format!("{}ANALYZER_MIN_SIZE", prefix), config.min_size);
        config.max_size = parse_env_var(&format!("{}ANALYZER_MAX_SIZE", prefix), config.max_size);
        config.step_multiplier =
            parse_env_var(&format!("{}ANALYZER_STEP_MULTIPLIER", prefix), config.step_multiplier);
        config.iterations = parse_env_var(&format!("{}ANALYZER_ITERATIONS", prefix), config.iterations);
        config.warmup_iterations = parse_env_var(
            &format!("{}ANALYZER_WARMUP_ITERATIONS", prefix),
            config.warmup_iterations,
        );
        config.validate()?;
        Ok(config)
    }

    /// Few points, few samples.
    fn performance_preset() -> Self {
        Self {
            min_size: 256,
            max_size: 4096,
            step_multiplier: 4,
            iterations: 3,
            warmup_iterations: 1,
        }
    }

    /// Small inputs only.
    fn memory_preset() -> Self {
        Self {
            min_size: 16,
            max_size: 1024,
            step_multiplier: 2,
            iterations: 5,
            warmup_iterations: 2,
        }
    }

    /// Many samples per point for stable medians.
    fn realtime_preset() -> Self {
        Self {
            min_size: 100,
            max_size: 6400,
            step_multiplier: 2,
            iterations: 15,
            warmup_iterations: 5,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(self, path, "analyzer")
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = load_json(path, "analyzer")?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for [`AnalyzerConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// Set the first input size.
    pub fn min_size(mut self, size: usize) -> Self {
        self.config.min_size = size;
        self
    }

    /// Set the inclusive upper bound on input sizes.
    pub fn max_size(mut self, size: usize) -> Self {
        self.config.max_size = size;
        self
    }

    /// Set the factor between consecutive sizes.
    pub fn step_multiplier(mut self, step: usize) -> Self {
        self.config.step_multiplier = step;
        self
    }

    /// Set the number of recorded runs per size.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Set the number of discarded warm-up runs per size.
    pub fn warmup_iterations(mut self, warmup: usize) -> Self {
        self.config.warmup_iterations = warmup;
        self
    }

    /// Build the configuration, returning an error if validation fails.
    pub fn build(self) -> Result<AnalyzerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
