//! Error handling for the algometer library
//!
//! Configuration problems and insufficient measurement data are the only
//! conditions reported as errors. Capacity exhaustion and absence are part of
//! the normal return contract of the containers (`bool` / `Option`).

use thiserror::Error;

/// Main error type for the algometer library
#[derive(Error, Debug)]
pub enum AlgometerError {
    /// I/O related errors (config file persistence)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid construction argument or analyzer configuration
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Too few measurement points to classify a growth pattern
    #[error("Insufficient data: need at least {required} measurement points, got {actual}")]
    InsufficientData {
        /// Minimum number of points required
        required: usize,
        /// Number of points supplied
        actual: usize,
    },

    /// Invalid data supplied to an operation
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },
}

impl AlgometerError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an insufficient data error
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an I/O error from a message
    pub fn io_error<S: Into<String>>(message: S) -> Self {
        Self::Io(std::io::Error::new(std::io::ErrorKind::Other, message.into()))
    }

    /// Check if this is a recoverable error
    ///
    /// Configuration and data errors fail fast and are never worth retrying.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Serialization(_) => false,
            Self::Configuration { .. } => false,
            Self::InsufficientData { .. } => false,
            Self::InvalidData { .. } => false,
            Self::OutOfBounds { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Configuration { .. } => "config",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::InvalidData { .. } => "data",
            Self::OutOfBounds { .. } => "bounds",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AlgometerError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(AlgometerError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}
