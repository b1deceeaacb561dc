//! Growth-rate classification of a measured series

use crate::error::{AlgometerError, Result};
use crate::statistics::{mean, pearson_correlation, population_variance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation a candidate basis must exceed to be accepted
pub const CORRELATION_THRESHOLD: f64 = 0.8;

const CONSTANT_MAX_RATIO: f64 = 1.1;
const CONSTANT_MAX_VARIANCE: f64 = 0.1;
const LOGARITHMIC_MAX_RATIO: f64 = 1.5;
const LINEAR_MIN_RATIO: f64 = 1.8;
const LINEAR_MAX_RATIO: f64 = 2.2;
const LINEAR_MAX_VARIANCE: f64 = 0.2;
const EXPONENTIAL_MIN_RATIO: f64 = 3.0;
/// Per-doubling ratio separating n log n from n² (ideal ratios ~2.2 and 4)
const QUADRATIC_MIN_RATIO: f64 = 3.0;
/// Per-doubling ratio separating n² from n³ (ideal ratios 4 and 8)
const CUBIC_MIN_RATIO: f64 = 6.0;
/// Per-doubling growth beyond any polynomial basis the classifier tries
const SUPER_POLYNOMIAL_RATIO: f64 = 10.0;

/// Asymptotic complexity classes the analyzer can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityClass {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Cubic,
    Exponential,
    Unknown,
}

impl ComplexityClass {
    /// Big-O notation
    pub fn notation(&self) -> &'static str {
        match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic => "O(n²)",
            Self::Cubic => "O(n³)",
            Self::Exponential => "O(2^n)",
            Self::Unknown => "O(?)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Constant => "Constant time/space",
            Self::Logarithmic => "Logarithmic time/space",
            Self::Linear => "Linear time/space",
            Self::Linearithmic => "Linearithmic time/space",
            Self::Quadratic => "Quadratic time/space",
            Self::Cubic => "Cubic time/space",
            Self::Exponential => "Exponential time/space",
            Self::Unknown => "Unknown complexity pattern",
        }
    }

    /// Shape of the class as a function of n, used for correlation
    fn basis(&self) -> fn(f64) -> f64 {
        match self {
            Self::Logarithmic => |n: f64| n.ln(),
            Self::Linearithmic => |n| n * n.ln(),
            Self::Quadratic => |n| n * n,
            Self::Cubic => |n| n * n * n,
            _ => |n| n,
        }
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// Outcome of classifying one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub class: ComplexityClass,
    /// Mean growth ratio per doubling of n
    pub growth_rate: f64,
    /// Population variance of the per-doubling ratios
    pub ratio_variance: f64,
    pub r_squared: f64,
}

/// Growth ratios between consecutive points, scaled to one doubling of n
///
/// A ratio whose previous value is 0 is 0. Sizes must strictly increase.
pub fn doubling_ratios(sizes: &[usize], values: &[f64]) -> Result<Vec<f64>> {
    let mut ratios = Vec::with_capacity(values.len().saturating_sub(1));

    for i in 1..values.len().min(sizes.len()) {
        let (prev_n, n) = (sizes[i - 1], sizes[i]);
        if n <= prev_n {
            return Err(AlgometerError::invalid_data(format!(
                "input sizes must strictly increase, got {} after {}",
                n, prev_n
            )));
        }

        let prev = values[i - 1];
        if prev <= 0.0 {
            ratios.push(0.0);
            continue;
        }

        let raw = values[i] / prev;
        let steps = (n as f64 / prev_n as f64).log2();
        ratios.push(raw.max(0.0).powf(1.0 / steps));
    }

    Ok(ratios)
}

fn correlation_with(class: ComplexityClass, sizes: &[f64], values: &[f64]) -> f64 {
    let basis = class.basis();
    let transformed: Vec<f64> = sizes.iter().map(|&n| basis(n)).collect();
    pearson_correlation(&transformed, values)
}

/// Classifies `values` measured at `sizes`
pub fn classify(sizes: &[usize], values: &[f64]) -> Result<Classification> {
    if sizes.len() != values.len() {
        return Err(AlgometerError::invalid_data(format!(
            "{} sizes for {} values",
            sizes.len(),
            values.len()
        )));
    }
    if values.len() < 2 {
        return Err(AlgometerError::insufficient_data(2, values.len()));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AlgometerError::invalid_data("measured values must be finite"));
    }

    let ratios = doubling_ratios(sizes, values)?;
    let growth_rate = mean(&ratios);
    let ratio_variance = population_variance(&ratios);
    let ns: Vec<f64> = sizes.iter().map(|&n| n as f64).collect();

    let class = if growth_rate < CONSTANT_MAX_RATIO && ratio_variance < CONSTANT_MAX_VARIANCE {
        ComplexityClass::Constant
    } else if growth_rate < LOGARITHMIC_MAX_RATIO
        && correlation_with(ComplexityClass::Logarithmic, &ns, values) > CORRELATION_THRESHOLD
    {
        ComplexityClass::Logarithmic
    } else if (LINEAR_MIN_RATIO..=LINEAR_MAX_RATIO).contains(&growth_rate)
        && ratio_variance < LINEAR_MAX_VARIANCE
    {
        ComplexityClass::Linear
    } else if growth_rate > SUPER_POLYNOMIAL_RATIO {
        ComplexityClass::Exponential
    } else {
        match super_linear_candidate(growth_rate) {
            Some(class) if correlation_with(class, &ns, values) > CORRELATION_THRESHOLD => class,
            _ if growth_rate > EXPONENTIAL_MIN_RATIO => ComplexityClass::Exponential,
            _ => ComplexityClass::Unknown,
        }
    };

    let r = correlation_with(class, &ns, values);
    Ok(Classification {
        class,
        growth_rate,
        ratio_variance,
        r_squared: r * r,
    })
}

/// Polynomial class whose per-doubling ratio band holds `growth_rate`
///
/// Over a geometric schedule n², n³ and a steeper curve all correlate with one
/// another, so the ratio picks the class and correlation only confirms it.
fn super_linear_candidate(growth_rate: f64) -> Option<ComplexityClass> {
    if growth_rate <= LINEAR_MAX_RATIO {
        None
    } else if growth_rate < QUADRATIC_MIN_RATIO {
        Some(ComplexityClass::Linearithmic)
    } else if growth_rate < CUBIC_MIN_RATIO {
        Some(ComplexityClass::Quadratic)
    } else {
        Some(ComplexityClass::Cubic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(count: u32) -> Vec<usize> {
        (0..count).map(|i| 100usize << i).collect()
    }

    fn series(sizes: &[usize], f: impl Fn(f64) -> f64) -> Vec<f64> {
        sizes.iter().map(|&n| f(n as f64)).collect()
    }

    #[test]
    fn test_notation_and_description() {
        assert_eq!(ComplexityClass::Linear.notation(), "O(n)");
        assert_eq!(ComplexityClass::Quadratic.to_string(), "O(n²)");
        assert_eq!(ComplexityClass::Unknown.description(), "Unknown complexity pattern");
        assert_eq!(ComplexityClass::Constant.description(), "Constant time/space");
    }

    #[test]
    fn test_doubling_ratios() -> Result<()> {
        let ratios = doubling_ratios(&[1, 2, 4], &[10.0, 20.0, 40.0])?;
        assert_eq!(ratios, vec![2.0, 2.0]);

        // A tenfold step with tenfold growth is one doubling's worth of 2x
        let ratios = doubling_ratios(&[10, 100], &[5.0, 50.0])?;
        assert!((ratios[0] - 2.0).abs() < 1e-9);

        let ratios = doubling_ratios(&[1, 2, 4], &[0.0, 20.0, 40.0])?;
        assert_eq!(ratios, vec![0.0, 2.0]);

        assert!(doubling_ratios(&[4, 4], &[1.0, 2.0]).is_err());
        Ok(())
    }

    #[test]
    fn test_classify_constant() -> Result<()> {
        let sizes = sizes(7);
        let result = classify(&sizes, &[50.0, 52.0, 49.0, 51.0, 50.0, 50.0, 53.0])?;
        assert_eq!(result.class, ComplexityClass::Constant);
        assert!((result.growth_rate - 1.0).abs() < 0.1);

        let zeros = classify(&sizes, &[0.0; 7])?;
        assert_eq!(zeros.class, ComplexityClass::Constant);
        assert_eq!(zeros.growth_rate, 0.0);
        Ok(())
    }

    #[test]
    fn test_classify_logarithmic() -> Result<()> {
        let sizes: Vec<usize> = (0..7).map(|i| 2usize << i).collect();
        let values = series(&sizes, |n| 100.0 * n.ln());
        let result = classify(&sizes, &values)?;
        assert_eq!(result.class, ComplexityClass::Logarithmic);
        assert!(result.r_squared > 0.99);
        Ok(())
    }

    #[test]
    fn test_classify_linear() -> Result<()> {
        let sizes = sizes(7);
        let values = series(&sizes, |n| 3.0 * n + 10.0);
        let result = classify(&sizes, &values)?;
        assert_eq!(result.class, ComplexityClass::Linear);
        assert!((result.growth_rate - 2.0).abs() < 0.05);
        assert!(result.r_squared > 0.999);
        Ok(())
    }

    #[test]
    fn test_classify_linear_with_tenfold_steps() -> Result<()> {
        let sizes = vec![10, 100, 1_000, 10_000];
        let values = series(&sizes, |n| 7.0 * n);
        let result = classify(&sizes, &values)?;
        assert_eq!(result.class, ComplexityClass::Linear);
        Ok(())
    }

    #[test]
    fn test_classify_super_linear() -> Result<()> {
        let sizes = sizes(7);

        let quadratic = classify(&sizes, &series(&sizes, |n| n * n))?;
        assert_eq!(quadratic.class, ComplexityClass::Quadratic);
        assert!((quadratic.growth_rate - 4.0).abs() < 1e-9);
        assert!(quadratic.r_squared > 0.999);

        let cubic = classify(&sizes, &series(&sizes, |n| n * n * n))?;
        assert_eq!(cubic.class, ComplexityClass::Cubic);

        let sizes: Vec<usize> = (0..7).map(|i| 2usize << i).collect();
        let nlogn = classify(&sizes, &series(&sizes, |n| n * n.ln()))?;
        assert_eq!(nlogn.class, ComplexityClass::Linearithmic);
        Ok(())
    }

    #[test]
    fn test_noisy_quadratic_is_not_cubic() -> Result<()> {
        // Timings of a double-nested loop whose last point landed high
        let sizes = sizes(7);
        let values = [
            14_705.0,
            61_331.0,
            237_258.0,
            957_152.0,
            3_951_660.0,
            9_284_686.0,
            51_699_972.0,
        ];
        let ns = series(&sizes, |n| n);
        assert!(
            correlation_with(ComplexityClass::Cubic, &ns, &values)
                > correlation_with(ComplexityClass::Quadratic, &ns, &values)
        );

        let result = classify(&sizes, &values)?;
        assert_eq!(result.class, ComplexityClass::Quadratic);
        assert!((result.growth_rate - 4.02).abs() < 0.01);
        assert!(result.r_squared > 0.99);
        Ok(())
    }

    #[test]
    fn test_slow_noisy_series_is_never_quadratic() -> Result<()> {
        // Linear work with alternating 1.5x noise: mean ratio stays under 2.2
        let sizes = sizes(7);
        let values = series(&sizes, |n| {
            if (n as usize / 100).trailing_zeros() % 2 == 1 {
                1.5 * n
            } else {
                n
            }
        });
        let ns = series(&sizes, |n| n);
        assert!(correlation_with(ComplexityClass::Quadratic, &ns, &values) > CORRELATION_THRESHOLD);

        let result = classify(&sizes, &values)?;
        assert!(result.growth_rate < LINEAR_MAX_RATIO);
        assert_eq!(result.class, ComplexityClass::Unknown);
        Ok(())
    }

    #[test]
    fn test_classify_exponential() -> Result<()> {
        let sizes: Vec<usize> = (1..=6).map(|i| i * 4).collect();
        let values = series(&sizes, |n| 2f64.powf(n));
        let result = classify(&sizes, &values)?;
        assert_eq!(result.class, ComplexityClass::Exponential);
        assert!(result.growth_rate > SUPER_POLYNOMIAL_RATIO);
        Ok(())
    }

    #[test]
    fn test_classify_unknown() -> Result<()> {
        let sizes = sizes(6);
        let result = classify(&sizes, &[100.0, 160.0, 100.0, 160.0, 100.0, 160.0])?;
        assert_eq!(result.class, ComplexityClass::Unknown);
        Ok(())
    }

    #[test]
    fn test_classify_rejects_bad_input() {
        assert!(matches!(
            classify(&[100], &[1.0]),
            Err(AlgometerError::InsufficientData { required: 2, actual: 1 })
        ));
        assert!(classify(&[100, 200], &[1.0]).is_err());
        assert!(classify(&[100, 200], &[1.0, f64::NAN]).is_err());
    }
}
