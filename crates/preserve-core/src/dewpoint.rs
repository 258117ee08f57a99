//! Dew point relations used by the IPI calculator.
//!
//! All three functions are rearrangements of one approximation:
//!
//! ```text
//! td = (112 + 0.9 t) * (rh / 100)^(1/8) + 0.1 t - 112
//! ```
//!
//! with temperatures in degrees Celsius and humidity in percent.

use preserve_model::{PreservationError, RelativeHumidity};

/// Dew point for air at `t` and `rh`.
pub fn dew_point(t: f64, rh: f64) -> Result<f64, PreservationError> {
    let a = humidity_factor(rh)?;
    Ok((112.0 + 0.9 * t) * a + 0.1 * t - 112.0)
}

/// Air temperature at which `rh` corresponds to dew point `td`.
pub fn temperature_from_dew_point(rh: f64, td: f64) -> Result<f64, PreservationError> {
    let a = humidity_factor(rh)?;
    Ok((td - 112.0 * a + 112.0) / (0.9 * a + 0.1))
}

/// Relative humidity of air at `t` with dew point `td`.
///
/// Not clamped: a dew point above `t` yields more than 100 %.
pub fn humidity_from_dew_point(t: f64, td: f64) -> f64 {
    100.0 * ((112.0 - 0.1 * t + td) / (112.0 + 0.9 * t)).powi(8)
}

fn humidity_factor(rh: f64) -> Result<f64, PreservationError> {
    let rh = RelativeHumidity::new(rh)?;
    Ok(rh.fraction().powf(1.0 / 8.0))
}
