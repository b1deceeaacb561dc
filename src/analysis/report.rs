//! Analysis results and their text rendering

use super::classifier::ComplexityClass;
use super::measurement::MeasurementPoint;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Resource a pass measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityType {
    Time,
    Space,
}

impl ComplexityType {
    /// The series a pass of this type classifies
    pub fn values(&self, points: &[MeasurementPoint]) -> Vec<f64> {
        points
            .iter()
            .map(|p| match self {
                Self::Time => p.average_time,
                Self::Space => p.average_memory,
            })
            .collect()
    }
}

impl fmt::Display for ComplexityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => f.write_str("Time"),
            Self::Space => f.write_str("Space"),
        }
    }
}

/// Classified outcome of one measurement pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityResult {
    pub complexity_type: ComplexityType,
    pub complexity_class: ComplexityClass,
    /// Mean growth ratio per doubling of the input size
    pub growth_rate: f64,
    pub r_squared: f64,
    pub measurement_points: Vec<MeasurementPoint>,
    /// Rendered text table, see [`render_report`]
    pub report: String,
}

impl ComplexityResult {
    /// Serializes the result, points and report included, as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ComplexityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Complexity: {}, Growth Rate: {:.2}, R²: {:.3}",
            self.complexity_class, self.growth_rate, self.r_squared
        )
    }
}

/// Time pass and independent space pass over the same algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedComplexityResult {
    pub time: ComplexityResult,
    pub space: ComplexityResult,
}

impl fmt::Display for CombinedComplexityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time: {}, Space: {}", self.time, self.space)
    }
}

/// Renders the summary header and per-size measurement table
pub fn render_report(
    complexity_type: ComplexityType,
    class: ComplexityClass,
    growth_rate: f64,
    r_squared: f64,
    points: &[MeasurementPoint],
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, complexity_type, class, growth_rate, r_squared, points);
    out
}

fn write_report(
    out: &mut String,
    complexity_type: ComplexityType,
    class: ComplexityClass,
    growth_rate: f64,
    r_squared: f64,
    points: &[MeasurementPoint],
) -> fmt::Result {
    writeln!(out, "=== Complexity Analysis Report ===")?;
    writeln!(out, "Type: {} Complexity", complexity_type)?;
    writeln!(out, "Detected Class: {} ({})", class, class.description())?;
    writeln!(out, "Growth Rate: {:.2}", growth_rate)?;
    writeln!(out, "R²: {:.3}", r_squared)?;
    writeln!(out, "Measurement Points: {}", points.len())?;
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        writeln!(out, "Input Size Range: {} - {}", first.input_size, last.input_size)?;
    }

    writeln!(out)?;
    writeln!(out, "=== Measurement Data ===")?;
    writeln!(
        out,
        "{:<10} {:<15} {:<15} {:<15}",
        "Size", "Time (ns)", "Memory (B)", "Std Dev"
    )?;
    for point in points {
        writeln!(
            out,
            "{:<10} {:<15.2} {:<15.2} {:<15.2}",
            point.input_size, point.average_time, point.average_memory, point.standard_deviation
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<MeasurementPoint> {
        vec![
            MeasurementPoint::from_values(100, 1_000.0, 800.0),
            MeasurementPoint::from_values(200, 2_000.0, 1_600.0),
        ]
    }

    fn result(class: ComplexityClass, complexity_type: ComplexityType) -> ComplexityResult {
        let points = points();
        ComplexityResult {
            complexity_type,
            complexity_class: class,
            growth_rate: 2.0,
            r_squared: 1.0,
            report: render_report(complexity_type, class, 2.0, 1.0, &points),
            measurement_points: points,
        }
    }

    #[test]
    fn test_values_by_type() {
        let points = points();
        assert_eq!(ComplexityType::Time.values(&points), vec![1_000.0, 2_000.0]);
        assert_eq!(ComplexityType::Space.values(&points), vec![800.0, 1_600.0]);
    }

    #[test]
    fn test_result_display() {
        let result = result(ComplexityClass::Linear, ComplexityType::Time);
        assert_eq!(result.to_string(), "Complexity: O(n), Growth Rate: 2.00, R²: 1.000");
    }

    #[test]
    fn test_combined_display() {
        let combined = CombinedComplexityResult {
            time: result(ComplexityClass::Quadratic, ComplexityType::Time),
            space: result(ComplexityClass::Constant, ComplexityType::Space),
        };
        let text = combined.to_string();
        assert!(text.starts_with("Time: Complexity: O(n²)"));
        assert!(text.contains(", Space: Complexity: O(1)"));
    }

    #[test]
    fn test_report_layout() {
        let report = result(ComplexityClass::Linear, ComplexityType::Space).report;
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "=== Complexity Analysis Report ===");
        assert_eq!(lines[1], "Type: Space Complexity");
        assert_eq!(lines[2], "Detected Class: O(n) (Linear time/space)");
        assert!(report.contains("Measurement Points: 2"));
        assert!(report.contains("Input Size Range: 100 - 200"));
        assert!(report.contains("=== Measurement Data ==="));
        assert!(lines.iter().any(|l| l.starts_with("200") && l.contains("2000.00")));
    }

    #[test]
    fn test_to_json() -> Result<()> {
        let json = result(ComplexityClass::Linear, ComplexityType::Time).to_json()?;
        assert!(json.contains("\"complexity_class\": \"Linear\""));
        assert!(json.contains("\"input_size\": 200"));
        Ok(())
    }
}
