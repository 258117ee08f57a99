//! Preservation Index, equilibrium moisture content and mold risk.
//!
//! A [`Calculator`] owns the three lookup tables and answers queries for a
//! temperature in degrees Celsius (`-20..=65`) and a relative humidity in
//! percent (`0..=100`). Inputs outside those ranges are rejected before any
//! table is consulted.
//!
//! ```rust,ignore
//! let calc = preserve_core::Calculator::from_artifact(&path)?;
//! let eval = calc.evaluate(20.0, 50.0)?;
//! println!("PI {} years, rated {}", eval.pi, eval.natural_aging);
//! ```
//!
//! The free functions [`pi`], [`emc`] and [`mold`] use a shared default
//! calculator loaded from the generated table artifact.

pub mod calculator;
pub mod dewpoint;
pub mod error;
pub mod scale;
pub mod shared;

pub use calculator::{Calculator, Evaluation};
pub use dewpoint::{dew_point, humidity_from_dew_point, temperature_from_dew_point};
pub use error::{CoreError, Result};
pub use scale::{TemperatureScale, from_celsius, to_celsius};
pub use shared::{default_calculator, emc, install_default, mold, pi};

pub use preserve_model::{
    EnvironmentalRating, MoistureContent, MoldRisk, PreservationIndex, rate_mechanical_damage,
    rate_metal_corrosion, rate_mold_growth, rate_natural_aging,
};
