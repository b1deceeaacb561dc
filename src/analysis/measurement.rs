//! Measurement points and the per-size sampling loops

use crate::statistics::{self, MemoryProbe};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::Instant;

/// Coefficient of variation above which a point's timings are reported as noisy
const NOISY_CV: f64 = 0.5;

/// One empirical observation at a single input size
///
/// `average_time` and `average_memory` hold the *median* of the recorded
/// samples. The standard deviation is the sample (n - 1) deviation of the
/// timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    pub input_size: usize,
    /// Median execution time in nanoseconds
    pub average_time: f64,
    /// Median heap growth in bytes
    pub average_memory: f64,
    /// Sample standard deviation of the timings in nanoseconds
    pub standard_deviation: f64,
    pub raw_time_samples: Vec<u64>,
    pub raw_memory_samples: Vec<u64>,
}

impl MeasurementPoint {
    /// Builds a point from raw samples
    pub fn from_samples(input_size: usize, time_samples: Vec<u64>, memory_samples: Vec<u64>) -> Self {
        let times: Vec<f64> = time_samples.iter().map(|&t| t as f64).collect();
        let memory: Vec<f64> = memory_samples.iter().map(|&m| m as f64).collect();

        Self {
            input_size,
            average_time: statistics::median(&times).unwrap_or(0.0),
            average_memory: statistics::median(&memory).unwrap_or(0.0),
            standard_deviation: statistics::sample_std_dev(&times),
            raw_time_samples: time_samples,
            raw_memory_samples: memory_samples,
        }
    }

    /// Builds a point from already reduced values, with no raw samples
    pub fn from_values(input_size: usize, time_ns: f64, memory_bytes: f64) -> Self {
        Self {
            input_size,
            average_time: time_ns,
            average_memory: memory_bytes,
            standard_deviation: 0.0,
            raw_time_samples: Vec::new(),
            raw_memory_samples: Vec::new(),
        }
    }

    /// Timing spread relative to the mean
    pub fn coefficient_of_variation(&self) -> f64 {
        let times: Vec<f64> = self.raw_time_samples.iter().map(|&t| t as f64).collect();
        statistics::coefficient_of_variation(&times)
    }
}

/// Heap growth between two probe readings, clamped at 0
#[inline]
fn heap_growth(before: usize, after: usize) -> u64 {
    after.saturating_sub(before) as u64
}

fn nanos_since(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

/// Warm-up runs followed by `iterations` timed and memory-sampled runs
///
/// Input generation happens outside the timed region. Memory is the heap
/// growth from after generation until after the algorithm returned, with its
/// result still alive.
pub(crate) fn sample_time_point<T, R, G, A>(
    size: usize,
    warmup: usize,
    iterations: usize,
    probe: &dyn MemoryProbe,
    generator: &mut G,
    algorithm: &mut A,
) -> MeasurementPoint
where
    G: FnMut(usize) -> T,
    A: FnMut(&T) -> R,
{
    for _ in 0..warmup {
        probe.stabilize();
        let input = generator(size);
        black_box(algorithm(black_box(&input)));
    }

    let mut time_samples = Vec::with_capacity(iterations);
    let mut memory_samples = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        probe.stabilize();
        let input = generator(size);
        let memory_before = probe.heap_in_use();

        let start = Instant::now();
        let result = algorithm(black_box(&input));
        let elapsed = nanos_since(start);

        let memory_after = probe.heap_in_use();
        black_box(&result);
        drop(result);

        time_samples.push(elapsed);
        memory_samples.push(heap_growth(memory_before, memory_after));
    }

    let point = MeasurementPoint::from_samples(size, time_samples, memory_samples);
    if point.coefficient_of_variation() > NOISY_CV {
        log::warn!(
            "Noisy timings at n={}: coefficient of variation {:.2}",
            size,
            point.coefficient_of_variation()
        );
    }
    log::debug!(
        "n={} median_time={:.0}ns median_memory={:.0}B std_dev={:.1}ns",
        size,
        point.average_time,
        point.average_memory,
        point.standard_deviation
    );
    point
}

/// `iterations` memory-only runs, no warm-up and no timing
pub(crate) fn sample_space_point<T, R, G, A>(
    size: usize,
    iterations: usize,
    probe: &dyn MemoryProbe,
    generator: &mut G,
    algorithm: &mut A,
) -> MeasurementPoint
where
    G: FnMut(usize) -> T,
    A: FnMut(&T) -> R,
{
    let mut memory_samples = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        probe.stabilize();
        let input = generator(size);
        let memory_before = probe.heap_in_use();
        let result = algorithm(black_box(&input));
        let memory_after = probe.heap_in_use();
        black_box(&result);
        drop(result);

        memory_samples.push(heap_growth(memory_before, memory_after));
    }

    let point = MeasurementPoint::from_samples(size, Vec::new(), memory_samples);
    log::debug!("n={} median_memory={:.0}B", size, point.average_memory);
    point
}
