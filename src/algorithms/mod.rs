//! Search and sort algorithms
//!
//! This module provides the classic search family and a stable merge sort:
//!
//! - [`BinarySearch`]: exact, leftmost, rightmost and range lookups on sorted
//!   slices, with a comparison counter for instrumentation
//! - [`linear_search`]: order-agnostic scans by value or predicate
//! - [`merge_sort`]: stable top-down merge sort plus a case-insensitive string
//!   variant

pub mod binary_search;
pub mod linear_search;
pub mod merge_sort;

pub use binary_search::BinarySearch;
pub use linear_search::SearchMetrics;
pub use merge_sort::{merge_sort, merge_sort_by, sort_strings_case_insensitive, MergeSort};

use serde::Serialize;
use std::fmt;

/// Configuration for algorithm behavior
#[derive(Debug, Clone)]
pub struct AlgorithmConfig {
    /// Memory budget for auxiliary buffers in bytes
    pub memory_budget: usize,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            memory_budget: 64 * 1024 * 1024, // 64MB
        }
    }
}

/// Performance statistics for algorithm execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlgorithmStats {
    /// Total items processed
    pub items_processed: usize,
    /// Processing time in microseconds
    pub processing_time_us: u64,
    /// Auxiliary memory used in bytes
    pub memory_used: usize,
    /// Element comparisons performed
    pub comparisons: usize,
}

impl AlgorithmStats {
    /// Calculate processing rate in items per second
    pub fn items_per_second(&self) -> f64 {
        if self.processing_time_us == 0 {
            return 0.0;
        }
        (self.items_processed as f64) / (self.processing_time_us as f64 / 1_000_000.0)
    }

    /// Calculate memory efficiency in items per byte
    pub fn items_per_byte(&self) -> f64 {
        if self.memory_used == 0 {
            return 0.0;
        }
        self.items_processed as f64 / self.memory_used as f64
    }
}

/// Trait for algorithms that can be benchmarked and configured
pub trait Algorithm {
    /// Configuration type for this algorithm
    type Config;

    /// Input type for this algorithm
    type Input;

    /// Output type for this algorithm
    type Output;

    /// Execute the algorithm with the given configuration and input
    fn execute(&self, config: &Self::Config, input: Self::Input) -> crate::Result<Self::Output>;

    /// Get performance statistics from the last execution
    fn stats(&self) -> AlgorithmStats;

    /// Estimate memory requirements for the given input size
    fn estimate_memory(&self, input_size: usize) -> usize;
}

/// Static description of an algorithm or container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    /// Solution strategy, e.g. "Divide and Conquer"
    pub strategy: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub advantages: &'static [&'static str],
    pub disadvantages: &'static [&'static str],
    pub use_cases: &'static [&'static str],
}

impl fmt::Display for AlgorithmInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.strategy)?;
        writeln!(f, "  Time:  {}", self.time_complexity)?;
        writeln!(f, "  Space: {}", self.space_complexity)?;
        writeln!(f, "  Advantages: {}", self.advantages.join("; "))?;
        writeln!(f, "  Disadvantages: {}", self.disadvantages.join("; "))?;
        write!(f, "  Use cases: {}", self.use_cases.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_config_default() {
        let config = AlgorithmConfig::default();
        assert_eq!(config.memory_budget, 64 * 1024 * 1024);
    }

    #[test]
    fn test_algorithm_stats() {
        let stats = AlgorithmStats {
            items_processed: 1000,
            processing_time_us: 1000, // 1ms
            memory_used: 1024,
            comparisons: 8_000,
        };

        assert_eq!(stats.items_per_second(), 1_000_000.0); // 1M items/sec
        assert_eq!(stats.items_per_byte(), 1000.0 / 1024.0);
    }

    #[test]
    fn test_algorithm_stats_edge_cases() {
        let stats = AlgorithmStats {
            items_processed: 1000,
            ..Default::default()
        };

        assert_eq!(stats.items_per_second(), 0.0);
        assert_eq!(stats.items_per_byte(), 0.0);
    }

    #[test]
    fn test_info_display() {
        let text = merge_sort::info().to_string();
        assert!(text.starts_with("Merge Sort (Divide and Conquer)"));
        assert!(text.contains("Time:  O(n log n)"));
    }
}
