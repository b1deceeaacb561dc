//! Statistics and Monitoring
//!
//! Sampling primitives shared by the operation metrics tracker and the
//! complexity analyzer:
//!
//! - [`timing`]: high-precision timers and duration formatting
//! - [`memory_tracking`]: counting global allocator and memory probes
//! - [`metrics`]: the process-wide operation metrics tracker
//!
//! The free functions below are the descriptive statistics both consumers use.

pub mod memory_tracking;
pub mod metrics;
pub mod timing;

pub use memory_tracking::{AllocationSnapshot, AllocatorProbe, CountingAllocator, MemoryProbe};
pub use metrics::{
    MeasurementContext, MetricsTracker, OperationComparison, OperationMetrics, PerformanceTrend,
    SortMetric, SystemPerformance, TrendDirection,
};
pub use timing::{format_duration, HighPrecisionTimer};

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median, averaging the two middle values for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let len = sorted.len();
    if len % 2 == 0 {
        Some((sorted[len / 2 - 1] + sorted[len / 2]) / 2.0)
    } else {
        Some(sorted[len / 2])
    }
}

/// Population variance (divides by `n`)
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (divides by `n - 1`), 0 for fewer than two values
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_sq = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Pearson correlation of two equally long series
///
/// Returns 0 when the lengths differ, fewer than two pairs are given, or
/// either series is constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    covariance / denominator
}

/// Sample standard deviation over mean, 0 when the mean is 0
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg == 0.0 {
        return 0.0;
    }
    sample_std_dev(values) / avg.abs()
}
