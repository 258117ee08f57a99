//! PI, EMC and mold risk lookups over a loaded [`TableSet`].

use std::path::Path;
use std::sync::Arc;

use preserve_model::{
    Concern, EnvironmentalRating, MoistureContent, MoldRisk, PreservationError, PreservationIndex,
    RelativeHumidity, Temperature,
};
use preserve_tables::{TableSet, TablesError, load_artifact};
use serde::Serialize;
use tracing::{debug, trace};

/// Evaluates environmental conditions against the calculator tables.
///
/// Cloning is cheap; clones share the same tables.
#[derive(Debug, Clone)]
pub struct Calculator {
    tables: Arc<TableSet>,
}

/// All outputs and ratings for one (temperature, humidity) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub temperature: f64,
    pub humidity: f64,
    pub pi: PreservationIndex,
    pub emc: MoistureContent,
    pub mold: MoldRisk,
    pub natural_aging: EnvironmentalRating,
    pub mechanical_damage: EnvironmentalRating,
    pub mold_growth: EnvironmentalRating,
    pub metal_corrosion: EnvironmentalRating,
}

impl Evaluation {
    pub fn ratings(&self) -> [(Concern, EnvironmentalRating); 4] {
        [
            (Concern::NaturalAging, self.natural_aging),
            (Concern::MechanicalDamage, self.mechanical_damage),
            (Concern::MoldGrowth, self.mold_growth),
            (Concern::MetalCorrosion, self.metal_corrosion),
        ]
    }

    /// The worst rating over all concerns.
    pub fn overall(&self) -> EnvironmentalRating {
        let ratings = self.ratings().map(|(_, rating)| rating);
        if ratings.contains(&EnvironmentalRating::Risk) {
            EnvironmentalRating::Risk
        } else if ratings.contains(&EnvironmentalRating::Ok) {
            EnvironmentalRating::Ok
        } else {
            EnvironmentalRating::Good
        }
    }
}

impl Calculator {
    pub fn new(tables: TableSet) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Load tables from a generated artifact.
    pub fn from_artifact(path: &Path) -> Result<Self, TablesError> {
        let tables = load_artifact(path)?;
        debug!(path = %path.display(), "loaded calculator tables");
        Ok(Self::new(tables))
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Preservation Index in years.
    pub fn pi(&self, t: f64, rh: f64) -> Result<PreservationIndex, PreservationError> {
        let (t, rh) = validate(t, rh)?;
        Ok(PreservationIndex(self.tables.pi.lookup(t, rh)?))
    }

    /// Equilibrium moisture content in percent.
    pub fn emc(&self, t: f64, rh: f64) -> Result<MoistureContent, PreservationError> {
        let (t, rh) = validate(t, rh)?;
        Ok(MoistureContent(self.tables.emc.lookup(t, rh)?))
    }

    /// Days until mold growth; zero outside the mold table's domain.
    pub fn mold(&self, t: f64, rh: f64) -> Result<MoldRisk, PreservationError> {
        let (t, rh) = validate(t, rh)?;
        if !self.tables.mold.contains(t, rh) {
            trace!(t, rh, "outside mold domain");
            return Ok(MoldRisk::NONE);
        }
        Ok(MoldRisk(self.tables.mold.lookup(t, rh)?))
    }

    pub fn evaluate(&self, t: f64, rh: f64) -> Result<Evaluation, PreservationError> {
        let pi = self.pi(t, rh)?;
        let emc = self.emc(t, rh)?;
        let mold = self.mold(t, rh)?;
        Ok(Evaluation {
            temperature: t,
            humidity: rh,
            pi,
            emc,
            mold,
            natural_aging: pi.natural_aging(),
            mechanical_damage: emc.mechanical_damage(),
            mold_growth: mold.mold_growth(),
            metal_corrosion: emc.metal_corrosion(),
        })
    }
}

/// Temperature first, so an input bad on both axes reports temperature.
fn validate(t: f64, rh: f64) -> Result<(f64, f64), PreservationError> {
    let t = Temperature::new(t)?;
    let rh = RelativeHumidity::new(rh)?;
    Ok((t.value(), rh.value()))
}
