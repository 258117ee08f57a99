//! Validated inputs and typed outputs of the calculator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Axis, IndexRangeError};
use crate::rating::{
    EnvironmentalRating, rate_mechanical_damage, rate_metal_corrosion, rate_mold_growth,
    rate_natural_aging,
};

/// Lowest temperature accepted by the calculator, degrees Celsius.
pub const TEMP_MIN: f64 = -20.0;
/// Highest temperature accepted by the calculator, degrees Celsius.
pub const TEMP_MAX: f64 = 65.0;
/// Lowest relative humidity, percent.
pub const RH_MIN: f64 = 0.0;
/// Highest relative humidity, percent.
pub const RH_MAX: f64 = 100.0;

/// Air temperature in degrees Celsius, within `TEMP_MIN..=TEMP_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64);

impl Temperature {
    pub fn new(celsius: f64) -> Result<Self, IndexRangeError> {
        check(Axis::Temperature, celsius, TEMP_MIN, TEMP_MAX).map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Temperature {
    type Error = IndexRangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [C]", self.0)
    }
}

/// Relative humidity in percent, within `RH_MIN..=RH_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RelativeHumidity(f64);

impl RelativeHumidity {
    pub fn new(percent: f64) -> Result<Self, IndexRangeError> {
        check(Axis::Humidity, percent, RH_MIN, RH_MAX).map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Humidity as a fraction in `0.0..=1.0`.
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl TryFrom<f64> for RelativeHumidity {
    type Error = IndexRangeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RelativeHumidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [%]", self.0)
    }
}

fn check(axis: Axis, value: f64, min: f64, max: f64) -> Result<f64, IndexRangeError> {
    // NaN fails both comparisons and is reported as out of range.
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(IndexRangeError::new(axis, value, min, max))
    }
}

/// Years until significant chemical decay of organic material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreservationIndex(pub i32);

impl PreservationIndex {
    pub fn value(self) -> i32 {
        self.0
    }

    pub fn natural_aging(self) -> EnvironmentalRating {
        rate_natural_aging(f64::from(self.0))
    }
}

impl fmt::Display for PreservationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Equilibrium moisture content in percent, one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoistureContent(pub f64);

impl MoistureContent {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn mechanical_damage(self) -> EnvironmentalRating {
        rate_mechanical_damage(self.0)
    }

    pub fn metal_corrosion(self) -> EnvironmentalRating {
        rate_metal_corrosion(self.0)
    }
}

impl fmt::Display for MoistureContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Days until mold growth is likely; zero means no risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoldRisk(pub i32);

impl MoldRisk {
    pub const NONE: MoldRisk = MoldRisk(0);

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_risk(self) -> bool {
        self.0 != 0
    }

    pub fn mold_growth(self) -> EnvironmentalRating {
        rate_mold_growth(f64::from(self.0))
    }
}

impl fmt::Display for MoldRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
