//! Temperature scale conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureScale {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "celsius",
            TemperatureScale::Fahrenheit => "fahrenheit",
            TemperatureScale::Kelvin => "kelvin",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
        }
    }

    /// Absolute zero expressed in this scale.
    pub fn absolute_zero(&self) -> f64 {
        from_celsius(-KELVIN_OFFSET, *self)
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemperatureScale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureScale::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureScale::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureScale::Kelvin),
            _ => Err(format!("Unsupported temperature scale: {s}")),
        }
    }
}

/// Convert `value` given in `scale` to degrees Celsius.
pub fn to_celsius(value: f64, scale: TemperatureScale) -> Result<f64> {
    // Float noise at exactly absolute zero, e.g. -459.67 °F, is accepted.
    if value < scale.absolute_zero() - 1e-9 || value.is_nan() {
        return Err(CoreError::BelowAbsoluteZero { value, scale });
    }
    Ok(match scale {
        TemperatureScale::Celsius => value,
        TemperatureScale::Fahrenheit => (value - 32.0) / 1.8,
        TemperatureScale::Kelvin => value - KELVIN_OFFSET,
    })
}

/// Convert degrees Celsius to `scale`.
pub fn from_celsius(celsius: f64, scale: TemperatureScale) -> f64 {
    match scale {
        TemperatureScale::Celsius => celsius,
        TemperatureScale::Fahrenheit => celsius * 1.8 + 32.0,
        TemperatureScale::Kelvin => celsius + KELVIN_OFFSET,
    }
}
