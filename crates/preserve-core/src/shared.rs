//! Process-wide calculator backed by the generated artifact.

use std::sync::OnceLock;

use preserve_model::{MoistureContent, MoldRisk, PreservationIndex};
use preserve_tables::default_artifact_path;

use crate::calculator::Calculator;
use crate::error::Result;

static DEFAULT_CALCULATOR: OnceLock<Calculator> = OnceLock::new();

/// Returns the default calculator, loading it on first use.
///
/// The artifact path is resolved by [`default_artifact_path`]. A failed load
/// is not cached; the next call tries again.
pub fn default_calculator() -> Result<&'static Calculator> {
    if let Some(calculator) = DEFAULT_CALCULATOR.get() {
        return Ok(calculator);
    }
    let calculator = Calculator::from_artifact(&default_artifact_path())?;
    Ok(DEFAULT_CALCULATOR.get_or_init(|| calculator))
}

/// Install `calculator` as the default before first use.
///
/// Returns it back if a default is already in place.
pub fn install_default(calculator: Calculator) -> std::result::Result<(), Calculator> {
    DEFAULT_CALCULATOR.set(calculator)
}

/// [`Calculator::pi`] on the default calculator.
pub fn pi(t: f64, rh: f64) -> Result<PreservationIndex> {
    Ok(default_calculator()?.pi(t, rh)?)
}

/// [`Calculator::emc`] on the default calculator.
pub fn emc(t: f64, rh: f64) -> Result<MoistureContent> {
    Ok(default_calculator()?.emc(t, rh)?)
}

/// [`Calculator::mold`] on the default calculator.
pub fn mold(t: f64, rh: f64) -> Result<MoldRisk> {
    Ok(default_calculator()?.mold(t, rh)?)
}
