//! Unit conversion utilities
//!
//! All ChainKit geometry is computed in millimeters. Chain standards are
//! usually quoted in inches (1/2" pitch, 5/16" rollers), so this module
//! handles conversion between Metric (mm) and Imperial (inch) lengths,
//! including fractional inch parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One millimeter, the native length unit.
pub const MM: f64 = 1.0;

/// One inch expressed in millimeters.
pub const INCH: f64 = 25.4 * MM;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// Millimeters per unit of this system
    pub fn scale(self) -> f64 {
        match self {
            Self::Metric => MM,
            Self::Imperial => INCH,
        }
    }

    /// Convert a value in this system to millimeters
    pub fn to_mm(self, value: f64) -> f64 {
        value * self.scale()
    }

    /// Convert a value in millimeters to this system
    pub fn from_mm(self, value_mm: f64) -> f64 {
        value_mm / self.scale()
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    format!("{:.3}", system.from_mm(value_mm))
}

/// Parse length string to millimeters
///
/// Accepts decimals (`"12.7"`), fractions (`"5/16"`) and mixed numbers
/// (`"1 1/2"`), interpreted in the units of `system`. An empty string
/// parses as zero; `"inf"` and `"NaN"` are rejected.
///
/// * `input` - String to parse
/// * `system` - Assumed measurement system
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let (sign, magnitude) = match input.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim_start()),
        None => (1.0, input),
    };

    let mut total = 0.0;
    for part in magnitude.split_whitespace() {
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err("Invalid fraction format".to_string());
            }
            let num = frac_parts[0]
                .parse::<f64>()
                .map_err(|_| "Invalid numerator".to_string())?;
            let den = frac_parts[1]
                .parse::<f64>()
                .map_err(|_| "Invalid denominator".to_string())?;
            if den == 0.0 {
                return Err("Division by zero".to_string());
            }
            total += num / den;
        } else {
            total += part.parse::<f64>().map_err(|e| e.to_string())?;
        }
    }

    if !total.is_finite() {
        return Err("Length must be a finite number".to_string());
    }
    Ok(system.to_mm(sign * total))
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
