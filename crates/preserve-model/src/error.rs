//! Error taxonomy for preservation lookups.
//!
//! [`PreservationError`] is the base error. Range violations are carried by
//! [`IndexRangeError`], which is specialised per axis so callers can tell a
//! temperature problem from a humidity problem whether it was raised by input
//! validation or by a table configured to reject out-of-range indices.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical axis of a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Table rows, degrees Celsius.
    Temperature,
    /// Table columns, percent relative humidity.
    Humidity,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Temperature => "temperature",
            Axis::Humidity => "relative humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Axis::Temperature => "C",
            Axis::Humidity => "%",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value fell outside the bounds of one axis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexRangeError {
    #[error("temperature {value} [C] is outside the valid range {min}..={max} [C]")]
    Temperature { value: f64, min: f64, max: f64 },

    #[error("relative humidity {value} [%] is outside the valid range {min}..={max} [%]")]
    Humidity { value: f64, min: f64, max: f64 },
}

impl IndexRangeError {
    pub fn new(axis: Axis, value: f64, min: f64, max: f64) -> Self {
        match axis {
            Axis::Temperature => Self::Temperature { value, min, max },
            Axis::Humidity => Self::Humidity { value, min, max },
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Self::Temperature { .. } => Axis::Temperature,
            Self::Humidity { .. } => Axis::Humidity,
        }
    }

    /// The offending value.
    pub fn value(&self) -> f64 {
        match self {
            Self::Temperature { value, .. } | Self::Humidity { value, .. } => *value,
        }
    }

    /// Inclusive bounds that were violated.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Temperature { min, max, .. } | Self::Humidity { min, max, .. } => (*min, *max),
        }
    }
}

/// Base error for table construction and lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreservationError {
    #[error(transparent)]
    IndexRange(#[from] IndexRangeError),

    #[error("table shape mismatch: {rows}x{cols} requires {expected} values, got {actual}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("table row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {axis} range {min}..={max}: maximum is below minimum")]
    InvalidRange { axis: Axis, min: i32, max: i32 },
}

impl PreservationError {
    pub fn is_temperature_error(&self) -> bool {
        matches!(self, Self::IndexRange(IndexRangeError::Temperature { .. }))
    }

    pub fn is_humidity_error(&self) -> bool {
        matches!(self, Self::IndexRange(IndexRangeError::Humidity { .. }))
    }

    pub fn as_index_range(&self) -> Option<&IndexRangeError> {
        match self {
            Self::IndexRange(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PreservationError>;
