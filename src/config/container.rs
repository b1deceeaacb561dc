//! Container sizing configuration.

use super::{load_json, parse_env_var, save_json, Config, ValidationError};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest accepted load factor
///
/// One entry needs `1 / load_factor` buckets, so this caps the hash table at
/// a million buckets per stored entry.
pub const MIN_LOAD_FACTOR: f64 = 1e-6;

/// Capacity and resize threshold shared by the containers.
///
/// `capacity` sizes the fixed ring buffer or the initial backing store of the
/// growable containers. `load_factor` is only consulted by the hash table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Fixed or initial number of slots / buckets
    pub capacity: usize,
    /// Resize trigger fraction, in `[MIN_LOAD_FACTOR, 1]`
    pub load_factor: f64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            load_factor: 0.75,
        }
    }
}

impl ContainerConfig {
    /// Configuration with the given capacity and the default load factor.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the load factor.
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub(crate) fn validate_capacity(capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(ValidationError::new("capacity", "0", "capacity must be positive")
                .with_suggestion(">= 1")
                .into());
        }
        Ok(())
    }

    pub(crate) fn validate_load_factor(load_factor: f64) -> Result<()> {
        if !load_factor.is_finite() || load_factor < MIN_LOAD_FACTOR || load_factor > 1.0 {
            return Err(ValidationError::new(
                "load_factor",
                &load_factor.to_string(),
                &format!("load factor must be in [{:e}, 1]", MIN_LOAD_FACTOR),
            )
            .with_suggestion("0.5 - 0.9")
            .into());
        }
        Ok(())
    }
}

impl Config for ContainerConfig {
    fn validate(&self) -> Result<()> {
        Self::validate_capacity(self.capacity)?;
        Self::validate_load_factor(self.load_factor)
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.capacity = parse_env_var(&format!("{}CONTAINER_CAPACITY", prefix), config.capacity);
        config.load_factor =
            parse_env_var(&format!("{}CONTAINER_LOAD_FACTOR", prefix), config.load_factor);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self { capacity: 1024, load_factor: 0.5 }
    }

    fn memory_preset() -> Self {
        Self { capacity: 8, load_factor: 1.0 }
    }

    fn realtime_preset() -> Self {
        Self { capacity: 256, load_factor: 0.6 }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_json(self, path, "container")
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = load_json(path, "container")?;
        config.validate()?;
        Ok(config)
    }
}
