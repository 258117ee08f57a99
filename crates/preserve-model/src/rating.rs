//! Environmental ratings derived from calculator outputs.
//!
//! Each concern maps a raw number onto [`EnvironmentalRating`] using the fixed
//! cut points of the IPI calculator. The functions are total: numbers the
//! tables never produce (negative values) follow the same thresholds and NaN
//! is rated [`EnvironmentalRating::Risk`].
//!
//! Boundary convention, per concern:
//!
//! | concern | Good | Ok | Risk |
//! |---|---|---|---|
//! | natural aging (PI) | `>= 75` | `45 ..< 75` | `< 45` |
//! | mechanical damage (EMC) | – | `5.0 ..= 12.5` | otherwise |
//! | mold growth (days) | `== 0` | – | otherwise |
//! | metal corrosion (EMC) | `< 7.0` | `7.0 ..< 10.5` | `>= 10.5` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// PI at or above this is [`EnvironmentalRating::Good`].
pub const NATURAL_AGING_GOOD: f64 = 75.0;
/// PI below this is [`EnvironmentalRating::Risk`].
pub const NATURAL_AGING_RISK: f64 = 45.0;
/// Inclusive EMC window rated [`EnvironmentalRating::Ok`] for mechanical damage.
pub const MECHANICAL_DAMAGE_OK: (f64, f64) = (5.0, 12.5);
/// EMC below this is [`EnvironmentalRating::Good`] for metal corrosion.
pub const METAL_CORROSION_GOOD: f64 = 7.0;
/// EMC at or above this is [`EnvironmentalRating::Risk`] for metal corrosion.
pub const METAL_CORROSION_RISK: f64 = 10.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvironmentalRating {
    /// No damage risk.
    Good,
    /// Low damage risk.
    Ok,
    /// High damage risk.
    Risk,
}

impl EnvironmentalRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentalRating::Good => "GOOD",
            EnvironmentalRating::Ok => "OK",
            EnvironmentalRating::Risk => "RISK",
        }
    }
}

impl fmt::Display for EnvironmentalRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnvironmentalRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GOOD" => Ok(EnvironmentalRating::Good),
            "OK" => Ok(EnvironmentalRating::Ok),
            "RISK" => Ok(EnvironmentalRating::Risk),
            _ => Err(format!("Unknown environmental rating: {s}")),
        }
    }
}

/// Damage mechanisms the calculator rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    NaturalAging,
    MechanicalDamage,
    MoldGrowth,
    MetalCorrosion,
}

impl Concern {
    pub const ALL: [Concern; 4] = [
        Concern::NaturalAging,
        Concern::MechanicalDamage,
        Concern::MoldGrowth,
        Concern::MetalCorrosion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Concern::NaturalAging => "natural aging",
            Concern::MechanicalDamage => "mechanical damage",
            Concern::MoldGrowth => "mold growth",
            Concern::MetalCorrosion => "metal corrosion",
        }
    }

    /// Rate `value` for this concern.
    pub fn rate(&self, value: f64) -> EnvironmentalRating {
        match self {
            Concern::NaturalAging => rate_natural_aging(value),
            Concern::MechanicalDamage => rate_mechanical_damage(value),
            Concern::MoldGrowth => rate_mold_growth(value),
            Concern::MetalCorrosion => rate_metal_corrosion(value),
        }
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Natural aging risk from the Preservation Index.
pub fn rate_natural_aging(pi: f64) -> EnvironmentalRating {
    if pi >= NATURAL_AGING_GOOD {
        EnvironmentalRating::Good
    } else if pi >= NATURAL_AGING_RISK {
        EnvironmentalRating::Ok
    } else {
        EnvironmentalRating::Risk
    }
}

/// Mechanical damage risk from equilibrium moisture content.
pub fn rate_mechanical_damage(emc: f64) -> EnvironmentalRating {
    let (low, high) = MECHANICAL_DAMAGE_OK;
    if (low..=high).contains(&emc) {
        EnvironmentalRating::Ok
    } else {
        EnvironmentalRating::Risk
    }
}

/// Mold growth risk from the mold risk factor (days to mold).
pub fn rate_mold_growth(mrf: f64) -> EnvironmentalRating {
    if mrf == 0.0 {
        EnvironmentalRating::Good
    } else {
        EnvironmentalRating::Risk
    }
}

/// Metal corrosion risk from equilibrium moisture content.
pub fn rate_metal_corrosion(emc: f64) -> EnvironmentalRating {
    if emc < METAL_CORROSION_GOOD {
        EnvironmentalRating::Good
    } else if emc < METAL_CORROSION_RISK {
        EnvironmentalRating::Ok
    } else {
        EnvironmentalRating::Risk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_from_str() {
        assert_eq!(
            "good".parse::<EnvironmentalRating>().unwrap(),
            EnvironmentalRating::Good
        );
        assert_eq!(
            " Risk ".parse::<EnvironmentalRating>().unwrap(),
            EnvironmentalRating::Risk
        );
        assert!("fine".parse::<EnvironmentalRating>().is_err());
    }

    #[test]
    fn test_nan_is_risk_everywhere() {
        for concern in Concern::ALL {
            assert_eq!(
                concern.rate(f64::NAN),
                EnvironmentalRating::Risk,
                "{concern}"
            );
        }
    }

    #[test]
    fn test_rating_serializes_uppercase() {
        let json = serde_json::to_string(&EnvironmentalRating::Ok).unwrap();
        assert_eq!(json, "\"OK\"");
    }
}
