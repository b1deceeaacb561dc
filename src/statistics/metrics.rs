//! Operation Metrics Tracker
//!
//! Aggregates per-operation timing and heap samples. A single shared tracker
//! exists per process ([`MetricsTracker::global`]), but it is always handed
//! out as an explicit `Arc` so call sites show who holds it. Independent
//! trackers can be created for isolated measurement sessions.
//!
//! # Examples
//!
//! ```rust
//! use algometer::statistics::{MetricsTracker, SortMetric};
//! use std::sync::Arc;
//!
//! let tracker = Arc::new(MetricsTracker::new());
//!
//! let context = tracker.start_measurement("parse");
//! let words: Vec<&str> = "a b c".split(' ').collect();
//! context.complete();
//!
//! let metrics = tracker.operation("parse").unwrap();
//! assert_eq!(metrics.count, 1);
//! assert_eq!(words.len(), 3);
//! assert_eq!(tracker.top_performers(5, SortMetric::AverageTime).len(), 1);
//! ```

use super::memory_tracking::{AllocationSnapshot, AllocatorProbe, CountingAllocator, MemoryProbe};
use super::timing::format_nanos;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

static GLOBAL_TRACKER: Lazy<Arc<MetricsTracker>> = Lazy::new(|| Arc::new(MetricsTracker::new()));

/// Samples compared at each end of the history for trend detection
const TREND_WINDOW: usize = 10;
/// Relative change of the windowed averages that counts as a trend
const TREND_THRESHOLD: f64 = 0.1;
/// Entries listed in [`MetricsTracker::generate_report`]
const REPORT_TOP_N: usize = 5;

fn duration_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Running aggregate for one named operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationMetrics {
    pub name: String,
    pub total_time_ns: u64,
    /// Sum of heap deltas in bytes; negative when the operation freed memory
    pub total_memory: i64,
    pub count: u64,
    pub min_time_ns: u64,
    pub max_time_ns: u64,
    pub min_memory: i64,
    pub max_memory: i64,
}

impl OperationMetrics {
    fn new(name: String, time_ns: u64, memory: i64) -> Self {
        Self {
            name,
            total_time_ns: time_ns,
            total_memory: memory,
            count: 1,
            min_time_ns: time_ns,
            max_time_ns: time_ns,
            min_memory: memory,
            max_memory: memory,
        }
    }

    /// Folds one sample into the aggregate
    pub fn add_measurement(&mut self, time_ns: u64, memory: i64) {
        self.total_time_ns = self.total_time_ns.saturating_add(time_ns);
        self.total_memory = self.total_memory.saturating_add(memory);
        self.count += 1;

        self.min_time_ns = self.min_time_ns.min(time_ns);
        self.max_time_ns = self.max_time_ns.max(time_ns);
        self.min_memory = self.min_memory.min(memory);
        self.max_memory = self.max_memory.max(memory);
    }

    pub fn average_time_ns(&self) -> f64 {
        self.total_time_ns as f64 / self.count as f64
    }

    pub fn average_memory(&self) -> f64 {
        self.total_memory as f64 / self.count as f64
    }

    pub fn total_time(&self) -> Duration {
        Duration::from_nanos(self.total_time_ns)
    }

    pub fn min_time(&self) -> Duration {
        Duration::from_nanos(self.min_time_ns)
    }

    pub fn max_time(&self) -> Duration {
        Duration::from_nanos(self.max_time_ns)
    }
}

impl fmt::Display for OperationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} avg ({} total, {} ops)",
            self.name,
            format_nanos(self.average_time_ns()),
            format_nanos(self.total_time_ns as f64),
            self.count
        )
    }
}

/// Ranking key for [`MetricsTracker::top_performers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMetric {
    /// Lowest average time first
    AverageTime,
    /// Lowest total time first
    TotalTime,
    /// Most executions first
    OperationCount,
    /// Lowest average heap delta first
    MemoryUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Improving,
    Stable,
    Degrading,
}

/// Timing history summary for one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTrend {
    pub name: String,
    pub samples: usize,
    pub average_time_ns: f64,
    /// Population standard deviation of the recorded times
    pub std_dev_ns: f64,
    pub trend: TrendDirection,
}

impl PerformanceTrend {
    fn from_history(name: &str, history: &[u64]) -> Self {
        let times: Vec<f64> = history.iter().map(|&t| t as f64).collect();
        let average = super::mean(&times);

        Self {
            name: name.to_string(),
            samples: times.len(),
            average_time_ns: average,
            std_dev_ns: super::population_variance(&times).sqrt(),
            trend: Self::direction(&times, average),
        }
    }

    /// Compares the first and last windows of up to [`TREND_WINDOW`] samples
    fn direction(times: &[f64], average: f64) -> TrendDirection {
        let window = TREND_WINDOW.min(times.len() / 2);
        if window == 0 {
            return TrendDirection::Stable;
        }

        let early = super::mean(&times[..window]);
        let late = super::mean(&times[times.len() - window..]);
        let threshold = average * TREND_THRESHOLD;

        if late > early + threshold {
            TrendDirection::Degrading
        } else if late < early - threshold {
            TrendDirection::Improving
        } else {
            TrendDirection::Stable
        }
    }
}

/// Side-by-side comparison of two operations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationComparison {
    pub first: OperationMetrics,
    pub second: OperationMetrics,
    /// `first` average time over `second` average time
    pub time_ratio: f64,
    /// `first` average memory over `second` average memory
    pub memory_ratio: f64,
}

impl OperationComparison {
    fn new(first: OperationMetrics, second: OperationMetrics) -> Self {
        let time_ratio = ratio(first.average_time_ns(), second.average_time_ns());
        let memory_ratio = ratio(first.average_memory(), second.average_memory());
        Self {
            first,
            second,
            time_ratio,
            memory_ratio,
        }
    }

    /// Name of the operation with the lower average time
    pub fn faster(&self) -> &str {
        if self.time_ratio < 1.0 {
            &self.first.name
        } else {
            &self.second.name
        }
    }

    /// Name of the operation with the lower average heap delta
    pub fn more_memory_efficient(&self) -> &str {
        if self.memory_ratio < 1.0 {
            &self.first.name
        } else {
            &self.second.name
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 {
            1.0
        } else {
            f64::INFINITY
        }
    } else {
        numerator / denominator
    }
}

/// Process-level figures reported alongside the aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemPerformance {
    /// Heap bytes in use according to the tracker's probe
    pub heap_in_use: usize,
    /// Peak heap bytes, 0 unless the counting allocator is installed
    pub peak_heap: usize,
    pub total_operations: u64,
    pub tracked_operations: usize,
}

#[derive(Debug)]
struct OperationEntry {
    metrics: OperationMetrics,
    /// Every recorded time in nanoseconds, oldest first
    history: Vec<u64>,
}

/// Thread-safe aggregator of operation samples
#[derive(Debug)]
pub struct MetricsTracker {
    operations: RwLock<HashMap<String, OperationEntry>>,
    total_operations: AtomicU64,
    probe: Arc<dyn MemoryProbe>,
}

impl MetricsTracker {
    /// Creates a tracker that reads the heap through [`AllocatorProbe`]
    pub fn new() -> Self {
        Self::with_probe(Arc::new(AllocatorProbe))
    }

    /// Creates a tracker with a custom heap probe
    pub fn with_probe(probe: Arc<dyn MemoryProbe>) -> Self {
        Self {
            operations: RwLock::new(HashMap::new()),
            total_operations: AtomicU64::new(0),
            probe,
        }
    }

    /// The process-wide tracker
    pub fn global() -> Arc<MetricsTracker> {
        Arc::clone(&GLOBAL_TRACKER)
    }

    /// Opens a measurement that records into this tracker on completion
    pub fn start_measurement(self: &Arc<Self>, name: impl Into<String>) -> MeasurementContext {
        let start_memory = self.probe.heap_in_use();
        MeasurementContext {
            tracker: Arc::clone(self),
            name: name.into(),
            start: Instant::now(),
            start_memory,
            completed: false,
        }
    }

    /// Folds an externally timed sample into the aggregate for `name`
    pub fn record(&self, name: &str, duration: Duration, memory_delta: i64) {
        let time_ns = duration_nanos(duration);
        {
            let mut operations = self.operations.write();
            match operations.get_mut(name) {
                Some(entry) => {
                    entry.metrics.add_measurement(time_ns, memory_delta);
                    entry.history.push(time_ns);
                }
                None => {
                    operations.insert(
                        name.to_string(),
                        OperationEntry {
                            metrics: OperationMetrics::new(name.to_string(), time_ns, memory_delta),
                            history: vec![time_ns],
                        },
                    );
                }
            }
        }
        self.total_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// Aggregate for `name`, if any sample was recorded
    pub fn operation(&self, name: &str) -> Option<OperationMetrics> {
        self.operations.read().get(name).map(|entry| entry.metrics.clone())
    }

    /// All aggregates, ordered by name
    pub fn all_operations(&self) -> Vec<OperationMetrics> {
        let mut all: Vec<_> = self
            .operations
            .read()
            .values()
            .map(|entry| entry.metrics.clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Samples recorded since creation or the last [`clear`](Self::clear)
    pub fn total_operations(&self) -> u64 {
        self.total_operations.load(Ordering::Relaxed)
    }

    /// Up to `limit` aggregates ranked by `metric`; ties break by name
    pub fn top_performers(&self, limit: usize, metric: SortMetric) -> Vec<OperationMetrics> {
        let mut ranked = self.all_operations();
        ranked.sort_by(|a, b| {
            let primary = match metric {
                SortMetric::AverageTime => a.average_time_ns().total_cmp(&b.average_time_ns()),
                SortMetric::TotalTime => a.total_time_ns.cmp(&b.total_time_ns),
                SortMetric::OperationCount => b.count.cmp(&a.count),
                SortMetric::MemoryUsage => a.average_memory().total_cmp(&b.average_memory()),
            };
            primary.then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Timing trend for `name`, if any sample was recorded
    pub fn performance_trend(&self, name: &str) -> Option<PerformanceTrend> {
        self.operations
            .read()
            .get(name)
            .map(|entry| PerformanceTrend::from_history(name, &entry.history))
    }

    /// Compares two recorded operations; `None` if either is unknown
    pub fn compare_operations(&self, first: &str, second: &str) -> Option<OperationComparison> {
        let operations = self.operations.read();
        let a = operations.get(first)?.metrics.clone();
        let b = operations.get(second)?.metrics.clone();
        Some(OperationComparison::new(a, b))
    }

    pub fn system_performance(&self) -> SystemPerformance {
        let peak_heap = if CountingAllocator::is_active() {
            AllocationSnapshot::capture().peak
        } else {
            0
        };

        SystemPerformance {
            heap_in_use: self.probe.heap_in_use(),
            peak_heap,
            total_operations: self.total_operations(),
            tracked_operations: self.operations.read().len(),
        }
    }

    /// Plain-text summary with the five fastest operations by average time
    pub fn generate_report(&self) -> String {
        let system = self.system_performance();
        let mut report = String::from("=== Performance Analysis Report ===\n\n");

        report.push_str("System Performance:\n");
        let _ = writeln!(report, "  Total Operations: {}", system.total_operations);
        let _ = writeln!(report, "  Tracked Operations: {}", system.tracked_operations);
        let _ = writeln!(
            report,
            "  Heap In Use: {} KB (peak {} KB)",
            system.heap_in_use / 1024,
            system.peak_heap / 1024
        );
        report.push('\n');

        report.push_str("Top Performers (by average execution time):\n");
        for (i, metrics) in self
            .top_performers(REPORT_TOP_N, SortMetric::AverageTime)
            .iter()
            .enumerate()
        {
            let _ = writeln!(report, "  {}. {}", i + 1, metrics);
        }

        report
    }

    /// Drops every aggregate and resets the operation counter
    pub fn clear(&self) {
        self.operations.write().clear();
        self.total_operations.store(0, Ordering::Relaxed);
    }

    /// Drops the aggregate for `name`, returning whether it existed
    pub fn clear_operation(&self, name: &str) -> bool {
        self.operations.write().remove(name).is_some()
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// An open measurement
///
/// Call [`complete`](Self::complete) to record it. A context that is dropped
/// without completing still records its sample, and logs a warning.
#[must_use = "a measurement records when completed or dropped"]
pub struct MeasurementContext {
    tracker: Arc<MetricsTracker>,
    name: String,
    start: Instant,
    start_memory: usize,
    completed: bool,
}

impl MeasurementContext {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time since the measurement started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Heap delta since the measurement started
    pub fn memory_used(&self) -> i64 {
        self.tracker.probe.heap_in_use() as i64 - self.start_memory as i64
    }

    /// Records the sample and returns the measured time and heap delta
    pub fn complete(mut self) -> (Duration, i64) {
        self.finish()
    }

    fn finish(&mut self) -> (Duration, i64) {
        let elapsed = self.start.elapsed();
        let memory = self.memory_used();
        self.completed = true;
        self.tracker.record(&self.name, elapsed, memory);
        (elapsed, memory)
    }
}

impl fmt::Debug for MeasurementContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasurementContext")
            .field("name", &self.name)
            .field("elapsed", &self.start.elapsed())
            .field("completed", &self.completed)
            .finish()
    }
}

impl Drop for MeasurementContext {
    fn drop(&mut self) {
        if !self.completed {
            log::warn!(
                "Measurement '{}' dropped without complete(), recording it now",
                self.name
            );
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Grows by `step` bytes on every reading
    #[derive(Debug)]
    struct SteppingProbe {
        reading: AtomicUsize,
        step: usize,
    }

    impl MemoryProbe for SteppingProbe {
        fn heap_in_use(&self) -> usize {
            self.reading.fetch_add(self.step, Ordering::Relaxed)
        }
    }

    fn tracker() -> Arc<MetricsTracker> {
        Arc::new(MetricsTracker::new())
    }

    #[test]
    fn test_record_aggregates() {
        let tracker = tracker();
        tracker.record("op", Duration::from_nanos(100), 10);
        tracker.record("op", Duration::from_nanos(300), -4);
        tracker.record("op", Duration::from_nanos(200), 30);

        let metrics = tracker.operation("op").unwrap();
        assert_eq!(metrics.count, 3);
        assert_eq!(metrics.total_time_ns, 600);
        assert_eq!(metrics.average_time_ns(), 200.0);
        assert_eq!(metrics.min_time(), Duration::from_nanos(100));
        assert_eq!(metrics.max_time(), Duration::from_nanos(300));
        assert_eq!(metrics.total_memory, 36);
        assert_eq!(metrics.min_memory, -4);
        assert_eq!(metrics.max_memory, 30);
        assert_eq!(metrics.average_memory(), 12.0);
        assert_eq!(tracker.total_operations(), 3);
        assert!(tracker.operation("missing").is_none());
    }

    #[test]
    fn test_measurement_context_uses_probe() {
        let probe = Arc::new(SteppingProbe {
            reading: AtomicUsize::new(1_000),
            step: 256,
        });
        let tracker = Arc::new(MetricsTracker::with_probe(probe));

        let context = tracker.start_measurement("alloc");
        assert_eq!(context.name(), "alloc");
        let (elapsed, memory) = context.complete();

        assert_eq!(memory, 256);
        let metrics = tracker.operation("alloc").unwrap();
        assert_eq!(metrics.count, 1);
        assert_eq!(metrics.total_memory, 256);
        assert_eq!(metrics.total_time_ns, duration_nanos(elapsed));
    }

    #[test]
    fn test_dropped_context_still_records() {
        let tracker = tracker();
        {
            let _context = tracker.start_measurement("scoped");
        }
        assert_eq!(tracker.operation("scoped").map(|m| m.count), Some(1));
    }

    #[test]
    fn test_top_performers_orderings() {
        let tracker = tracker();
        tracker.record("slow", Duration::from_micros(50), 10);
        tracker.record("fast", Duration::from_micros(1), 500);
        tracker.record("busy", Duration::from_micros(10), 0);
        tracker.record("busy", Duration::from_micros(10), 0);
        tracker.record("busy", Duration::from_micros(10), 0);

        let names = |metric| -> Vec<String> {
            tracker
                .top_performers(10, metric)
                .into_iter()
                .map(|m| m.name)
                .collect()
        };

        assert_eq!(names(SortMetric::AverageTime), vec!["fast", "busy", "slow"]);
        assert_eq!(names(SortMetric::TotalTime), vec!["fast", "busy", "slow"]);
        assert_eq!(names(SortMetric::OperationCount), vec!["busy", "fast", "slow"]);
        assert_eq!(names(SortMetric::MemoryUsage), vec!["busy", "slow", "fast"]);
        assert_eq!(tracker.top_performers(1, SortMetric::AverageTime).len(), 1);
        assert!(tracker.top_performers(0, SortMetric::AverageTime).is_empty());
    }

    #[test]
    fn test_performance_trend() {
        let tracker = tracker();
        for t in [100u64, 100, 100, 100, 300, 300, 300, 300] {
            tracker.record("slowing", Duration::from_nanos(t), 0);
        }
        for t in [500u64, 480, 200, 210] {
            tracker.record("warming", Duration::from_nanos(t), 0);
        }
        for _ in 0..6 {
            tracker.record("steady", Duration::from_nanos(1_000), 0);
        }
        tracker.record("single", Duration::from_nanos(5), 0);

        let slowing = tracker.performance_trend("slowing").unwrap();
        assert_eq!(slowing.trend, TrendDirection::Degrading);
        assert_eq!(slowing.samples, 8);
        assert_eq!(slowing.average_time_ns, 200.0);
        assert_eq!(slowing.std_dev_ns, 100.0);

        assert_eq!(tracker.performance_trend("warming").unwrap().trend, TrendDirection::Improving);
        assert_eq!(tracker.performance_trend("steady").unwrap().trend, TrendDirection::Stable);
        assert_eq!(tracker.performance_trend("single").unwrap().trend, TrendDirection::Stable);
        assert!(tracker.performance_trend("none").is_none());
    }

    #[test]
    fn test_compare_operations() {
        let tracker = tracker();
        tracker.record("a", Duration::from_nanos(100), 400);
        tracker.record("b", Duration::from_nanos(400), 100);

        let comparison = tracker.compare_operations("a", "b").unwrap();
        assert_eq!(comparison.time_ratio, 0.25);
        assert_eq!(comparison.memory_ratio, 4.0);
        assert_eq!(comparison.faster(), "a");
        assert_eq!(comparison.more_memory_efficient(), "b");
        assert!(tracker.compare_operations("a", "zzz").is_none());

        tracker.record("none1", Duration::ZERO, 0);
        tracker.record("none2", Duration::ZERO, 0);
        let zeros = tracker.compare_operations("none1", "none2").unwrap();
        assert_eq!(zeros.time_ratio, 1.0);
        assert_eq!(zeros.faster(), "none2");
    }

    #[test]
    fn test_clear_and_clear_operation() {
        let tracker = tracker();
        tracker.record("x", Duration::from_nanos(1), 0);
        tracker.record("y", Duration::from_nanos(1), 0);

        assert!(tracker.clear_operation("x"));
        assert!(!tracker.clear_operation("x"));
        assert_eq!(tracker.all_operations().len(), 1);
        assert_eq!(tracker.total_operations(), 2);

        tracker.clear();
        assert!(tracker.all_operations().is_empty());
        assert_eq!(tracker.total_operations(), 0);
    }

    #[test]
    fn test_report() {
        let tracker = tracker();
        for i in 0..7u64 {
            tracker.record(&format!("op{}", i), Duration::from_micros(i + 1), 0);
        }

        let report = tracker.generate_report();
        assert!(report.starts_with("=== Performance Analysis Report ==="));
        assert!(report.contains("Total Operations: 7"));
        assert!(report.contains("Tracked Operations: 7"));
        assert!(report.contains("  1. op0: 1.000μs avg (1.000μs total, 1 ops)"));
        assert!(report.contains("  5. op4"));
        assert!(!report.contains("op5"));
    }

    #[test]
    fn test_system_performance_counts() {
        let tracker = tracker();
        tracker.record("a", Duration::from_nanos(1), 0);
        tracker.record("a", Duration::from_nanos(1), 0);
        let system = tracker.system_performance();
        assert_eq!(system.total_operations, 2);
        assert_eq!(system.tracked_operations, 1);
    }

    #[test]
    fn test_global_is_shared() {
        let a = MetricsTracker::global();
        let b = MetricsTracker::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
