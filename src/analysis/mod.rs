//! Empirical Complexity Analysis
//!
//! [`ComplexityAnalyzer`] runs an algorithm over a geometric schedule of input
//! sizes, samples time and heap growth at each size, and classifies how the
//! median values grow.
//!
//! # Examples
//!
//! ```rust
//! use algometer::{AnalyzerConfig, ComplexityAnalyzer, ComplexityType, MeasurementPoint};
//!
//! // Classify externally gathered points
//! let points: Vec<_> = [100, 200, 400, 800]
//!     .iter()
//!     .map(|&n| MeasurementPoint::from_values(n, n as f64 * 5.0, 0.0))
//!     .collect();
//! let result = ComplexityAnalyzer::analyze_points(points, ComplexityType::Time)?;
//! assert_eq!(result.complexity_class.notation(), "O(n)");
//!
//! // Or measure a closure directly
//! let mut analyzer = ComplexityAnalyzer::with_config(AnalyzerConfig::new(64, 512, 2, 3))?;
//! let result = analyzer.measure_time_complexity(|n| vec![1u32; n], |v| v.iter().sum::<u32>())?;
//! assert_eq!(result.measurement_points.len(), 4);
//! # Ok::<(), algometer::AlgometerError>(())
//! ```
//!
//! Memory figures come from a [`MemoryProbe`]. The default probe reads the
//! [`CountingAllocator`](crate::statistics::CountingAllocator) counters and
//! reports flat zeros unless that allocator is installed.

pub mod classifier;
pub mod measurement;
pub mod report;

pub use classifier::{Classification, ComplexityClass};
pub use measurement::MeasurementPoint;
pub use report::{CombinedComplexityResult, ComplexityResult, ComplexityType};

use crate::config::{AnalyzerConfig, Config};
use crate::error::{AlgometerError, Result};
use crate::statistics::{AllocatorProbe, HighPrecisionTimer, MemoryProbe};
use std::sync::Arc;

/// Drives measurement passes and keeps the points of the most recent one
#[derive(Debug, Clone)]
pub struct ComplexityAnalyzer {
    config: AnalyzerConfig,
    probe: Arc<dyn MemoryProbe>,
    last: Vec<MeasurementPoint>,
}

impl Default for ComplexityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplexityAnalyzer {
    /// Analyzer with the default schedule (100 to 10000, doubling, 5 runs)
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            probe: Arc::new(AllocatorProbe),
            last: Vec::new(),
        }
    }

    /// Analyzer with a validated custom schedule
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Replaces the memory probe
    pub fn with_probe(mut self, probe: Arc<dyn MemoryProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Replaces the default schedule, keeping the old one on error
    pub fn set_config(&mut self, config: AnalyzerConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Points measured by the most recent pass
    pub fn last_measurements(&self) -> &[MeasurementPoint] {
        &self.last
    }

    /// Time pass over the analyzer's schedule
    ///
    /// `generator` builds the input for a size outside the timed region;
    /// `algorithm` is timed on a borrow of it.
    pub fn measure_time_complexity<T, R, G, A>(&mut self, generator: G, algorithm: A) -> Result<ComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        let config = self.config.clone();
        self.measure_time_complexity_with_config(generator, algorithm, &config)
    }

    pub fn measure_time_complexity_with_config<T, R, G, A>(
        &mut self,
        mut generator: G,
        mut algorithm: A,
        config: &AnalyzerConfig,
    ) -> Result<ComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        self.time_pass(&mut generator, &mut algorithm, config)
    }

    /// Space pass over the analyzer's schedule
    pub fn measure_space_complexity<T, R, G, A>(&mut self, generator: G, algorithm: A) -> Result<ComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        let config = self.config.clone();
        self.measure_space_complexity_with_config(generator, algorithm, &config)
    }

    pub fn measure_space_complexity_with_config<T, R, G, A>(
        &mut self,
        mut generator: G,
        mut algorithm: A,
        config: &AnalyzerConfig,
    ) -> Result<ComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        self.space_pass(&mut generator, &mut algorithm, config)
    }

    /// Time pass followed by an independent space pass
    ///
    /// [`last_measurements`](Self::last_measurements) holds the space pass
    /// points afterwards.
    pub fn measure_combined_complexity<T, R, G, A>(
        &mut self,
        generator: G,
        algorithm: A,
    ) -> Result<CombinedComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        let config = self.config.clone();
        self.measure_combined_complexity_with_config(generator, algorithm, &config)
    }

    pub fn measure_combined_complexity_with_config<T, R, G, A>(
        &mut self,
        mut generator: G,
        mut algorithm: A,
        config: &AnalyzerConfig,
    ) -> Result<CombinedComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        let time = self.time_pass(&mut generator, &mut algorithm, config)?;
        let space = self.space_pass(&mut generator, &mut algorithm, config)?;
        Ok(CombinedComplexityResult { time, space })
    }

    /// Classifies externally supplied points
    ///
    /// Points must be ordered by strictly increasing input size.
    pub fn analyze_points(points: Vec<MeasurementPoint>, complexity_type: ComplexityType) -> Result<ComplexityResult> {
        if points.len() < 2 {
            return Err(AlgometerError::insufficient_data(2, points.len()));
        }

        let sizes: Vec<usize> = points.iter().map(|p| p.input_size).collect();
        let values = complexity_type.values(&points);
        let Classification {
            class,
            growth_rate,
            r_squared,
            ..
        } = classifier::classify(&sizes, &values)?;

        log::info!(
            "{} complexity over {} points: {} (growth {:.2}, R² {:.3})",
            complexity_type,
            points.len(),
            class,
            growth_rate,
            r_squared
        );

        Ok(ComplexityResult {
            complexity_type,
            complexity_class: class,
            growth_rate,
            r_squared,
            report: report::render_report(complexity_type, class, growth_rate, r_squared, &points),
            measurement_points: points,
        })
    }

    fn time_pass<T, R, G, A>(&mut self, generator: &mut G, algorithm: &mut A, config: &AnalyzerConfig) -> Result<ComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        config.validate()?;
        let timer = HighPrecisionTimer::named("time complexity pass");

        let points: Vec<MeasurementPoint> = config
            .size_schedule()
            .into_iter()
            .map(|size| {
                measurement::sample_time_point(
                    size,
                    config.warmup_iterations,
                    config.iterations,
                    self.probe.as_ref(),
                    &mut *generator,
                    &mut *algorithm,
                )
            })
            .collect();

        timer.log_elapsed();
        self.finish(points, ComplexityType::Time)
    }

    fn space_pass<T, R, G, A>(&mut self, generator: &mut G, algorithm: &mut A, config: &AnalyzerConfig) -> Result<ComplexityResult>
    where
        G: FnMut(usize) -> T,
        A: FnMut(&T) -> R,
    {
        config.validate()?;
        let timer = HighPrecisionTimer::named("space complexity pass");

        let points: Vec<MeasurementPoint> = config
            .size_schedule()
            .into_iter()
            .map(|size| {
                measurement::sample_space_point(
                    size,
                    config.iterations,
                    self.probe.as_ref(),
                    &mut *generator,
                    &mut *algorithm,
                )
            })
            .collect();

        timer.log_elapsed();
        self.finish(points, ComplexityType::Space)
    }

    fn finish(&mut self, points: Vec<MeasurementPoint>, complexity_type: ComplexityType) -> Result<ComplexityResult> {
        self.last = points.clone();
        Self::analyze_points(points, complexity_type)
    }
}
