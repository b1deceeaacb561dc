//! High-Precision Timing
//!
//! Monotonic timers built on [`Instant`] and human-readable duration output.

use std::fmt;
use std::time::{Duration, Instant};

/// Format a duration in human-readable form with automatic unit selection
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.3}μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.3}ms", nanos as f64 / 1_000_000.0)
    } else if nanos < 60_000_000_000 {
        format!("{:.3}s", nanos as f64 / 1_000_000_000.0)
    } else {
        format!("{:.2}m", duration.as_secs_f64() / 60.0)
    }
}

/// Format fractional nanoseconds, as produced by averages and medians
pub fn format_nanos(nanos: f64) -> String {
    if !nanos.is_finite() || nanos <= 0.0 {
        return "0ns".to_string();
    }
    format_duration(Duration::from_nanos(nanos.round() as u64))
}

/// Named high-precision timer
#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    name: String,
    start_time: Instant,
}

impl HighPrecisionTimer {
    /// Create a new timer with a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_time: Instant::now(),
        }
    }

    /// Create a new anonymous timer
    pub fn new() -> Self {
        Self::named("timer")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get elapsed time since timer creation
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get elapsed time in nanoseconds, saturating at `u64::MAX`
    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    /// Restart the timer
    pub fn restart(&mut self) {
        self.start_time = Instant::now();
    }

    /// Log elapsed time at debug level
    pub fn log_elapsed(&self) {
        log::debug!("{}: {}", self.name, format_duration(self.elapsed()));
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HighPrecisionTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, format_duration(self.elapsed()))
    }
}

/// Runs `f` once, returning its result and wall-clock duration
#[inline]
pub fn time_it<R, F: FnOnce() -> R>(f: F) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
