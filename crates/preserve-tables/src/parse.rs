//! Extraction of table metadata and payloads from calculator source text.
//!
//! `dp.js` stores the PI and mold tables back to back in one `pitable`
//! array and the EMC table in `emctable`. The lookup functions encode each
//! table's axis ranges in their index arithmetic; those constants are read
//! from the text, validated against each other, and used to slice the flat
//! payloads into [`RawTable`]s.

use std::fmt;

use preserve_model::BoundaryPolicy;
use regex::Captures;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TablesError};
use crate::patterns::Section;

/// Humidity axis implied when a lookup only states a column count of 101.
const FULL_RH_SPAN: (i32, i32) = (0, 100);

/// Decimal places kept for EMC values.
pub const EMC_DECIMALS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Preservation Index, years.
    Pi,
    /// Equilibrium Moisture Content, percent.
    Emc,
    /// Mold risk, days.
    Mold,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::Pi, TableKind::Emc, TableKind::Mold];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Pi => "pi",
            TableKind::Emc => "emc",
            TableKind::Mold => "mold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Pi => "Preservation Index",
            TableKind::Emc => "Equilibrium Moisture Content",
            TableKind::Mold => "Mold Risk",
        }
    }

    /// Out-of-range handling the calculator applies to this table.
    ///
    /// PI and EMC pin both indices to the table edge. Mold returns "no risk"
    /// outside its domain, which the caller decides before looking up, so the
    /// table itself rejects anything out of range.
    pub fn policy(&self) -> BoundaryPolicy {
        match self {
            TableKind::Pi | TableKind::Emc => BoundaryPolicy::Clamp,
            TableKind::Mold => BoundaryPolicy::Raise,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Axis ranges of one table and its position inside the flat array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub temp_min: i32,
    pub temp_max: i32,
    pub rh_min: i32,
    pub rh_max: i32,
    pub array_offset: usize,
}

impl TableMeta {
    pub fn rows(&self) -> usize {
        span(self.temp_min, self.temp_max)
    }

    pub fn cols(&self) -> usize {
        span(self.rh_min, self.rh_max)
    }

    /// Cell count; saturates so that absurd ranges fail the size checks.
    pub fn size(&self) -> usize {
        self.rows().saturating_mul(self.cols())
    }
}

impl fmt::Display for TableMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "temperature {}..={}, humidity {}..={}, {}x{} at offset {}",
            self.temp_min,
            self.temp_max,
            self.rh_min,
            self.rh_max,
            self.rows(),
            self.cols(),
            self.array_offset
        )
    }
}

/// Index constants as written in a lookup function, before validation.
#[derive(Debug, Clone, Copy, Default)]
struct IndexExpr {
    temp_min: i32,
    temp_max: i32,
    temp_offset: Option<i32>,
    rh_size: usize,
    rh_min: Option<i32>,
    rh_max: Option<i32>,
    rh_offset: Option<i32>,
    array_offset: usize,
}

impl IndexExpr {
    /// Derive the missing humidity bound and check the offsets.
    ///
    /// Every offset in the index arithmetic must cancel the axis minimum,
    /// otherwise the table would be addressed from the wrong origin.
    fn resolve(self, table: TableKind) -> Result<TableMeta> {
        if self.temp_max < self.temp_min {
            return Err(TablesError::metadata(
                table,
                format!(
                    "temperature maximum {} is below minimum {}",
                    self.temp_max, self.temp_min
                ),
            ));
        }
        if self.rh_size == 0 {
            return Err(TablesError::metadata(table, "humidity axis has no columns"));
        }
        let size = i64::try_from(self.rh_size).unwrap_or(i64::MAX);
        let (rh_min, rh_max) = match (self.rh_min, self.rh_max) {
            (Some(min), Some(max)) => {
                if i64::from(max) - i64::from(min) + 1 != size {
                    return Err(TablesError::metadata(
                        table,
                        format!("humidity range {min}..={max} does not span {size} columns"),
                    ));
                }
                (min, max)
            }
            (Some(min), None) => {
                let max = i64::from(min).saturating_add(size - 1);
                (min, axis_bound(table, max)?)
            }
            (None, Some(max)) => {
                let min = i64::from(max).saturating_sub(size - 1);
                (axis_bound(table, min)?, max)
            }
            (None, None) if self.rh_size == 101 => FULL_RH_SPAN,
            (None, None) => {
                return Err(TablesError::metadata(
                    table,
                    format!("cannot derive humidity range from {size} columns alone"),
                ));
            }
        };
        if let Some(offset) = self.temp_offset
            && i64::from(offset) != -i64::from(self.temp_min)
        {
            return Err(TablesError::metadata(
                table,
                format!(
                    "temperature offset {offset} does not cancel minimum {}",
                    self.temp_min
                ),
            ));
        }
        if let Some(offset) = self.rh_offset
            && i64::from(offset) != -i64::from(rh_min)
        {
            return Err(TablesError::metadata(
                table,
                format!("humidity offset {offset} does not cancel minimum {rh_min}"),
            ));
        }
        Ok(TableMeta {
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            rh_min,
            rh_max,
            array_offset: self.array_offset,
        })
    }
}

/// Number of whole units in `min..=max`, zero when inverted.
fn span(min: i32, max: i32) -> usize {
    let len = i64::from(max) - i64::from(min) + 1;
    usize::try_from(len).unwrap_or(0)
}

/// A derived humidity bound, rejected when it leaves the `i32` range.
fn axis_bound(table: TableKind, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        TablesError::metadata(table, format!("derived humidity bound {value} is out of range"))
    })
}

/// Values of one table as found in the source array.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValues {
    Integers(Vec<i32>),
    Decimals(Vec<f64>),
}

impl RawValues {
    pub fn len(&self) -> usize {
        match self {
            RawValues::Integers(values) => values.len(),
            RawValues::Decimals(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub kind: TableKind,
    pub meta: TableMeta,
    pub values: RawValues,
}

/// Everything extracted from one calculator source.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    pub pi: RawTable,
    pub emc: RawTable,
    pub mold: RawTable,
    /// Declared length of `pitable` (PI and mold data).
    pub pi_array_len: usize,
    /// Declared length of `emctable`.
    pub emc_array_len: usize,
}

impl ParsedSource {
    pub fn table(&self, kind: TableKind) -> &RawTable {
        match kind {
            TableKind::Pi => &self.pi,
            TableKind::Emc => &self.emc,
            TableKind::Mold => &self.mold,
        }
    }
}

/// Extract and cross-check all three tables from `dp.js` text.
pub fn parse_source(source: &str) -> Result<ParsedSource> {
    debug!(chars = source.len(), "parsing calculator source");

    let pi_array_len = declared_len(source, Section::PiArraySize)?;
    let emc_array_len = declared_len(source, Section::EmcArraySize)?;

    let pi_meta = pi_expr(&Section::PiRanges.find_unique(source)?)?.resolve(TableKind::Pi)?;
    let emc_meta = emc_expr(&Section::EmcRanges.find_unique(source)?)?.resolve(TableKind::Emc)?;
    let mold_meta =
        mold_expr(&Section::MoldRanges.find_unique(source)?)?.resolve(TableKind::Mold)?;
    for (kind, meta) in [
        (TableKind::Pi, &pi_meta),
        (TableKind::Emc, &emc_meta),
        (TableKind::Mold, &mold_meta),
    ] {
        debug!(table = %kind, %meta, "resolved table metadata");
    }

    cross_check(&pi_meta, &emc_meta, &mold_meta, pi_array_len, emc_array_len)?;

    let pi_values = integer_payload(source, Section::PiData)?;
    if pi_values.len() != pi_array_len {
        return Err(TablesError::SizeMismatch {
            what: "pitable payload length",
            expected: pi_array_len,
            actual: pi_values.len(),
        });
    }
    let emc_values = decimal_payload(source, Section::EmcData)?;
    if emc_values.len() != emc_array_len {
        return Err(TablesError::SizeMismatch {
            what: "emctable payload length",
            expected: emc_array_len,
            actual: emc_values.len(),
        });
    }
    info!(
        pi_values = pi_values.len(),
        emc_values = emc_values.len(),
        "extracted table payloads"
    );

    let mold_values = pi_values[mold_meta.array_offset..].to_vec();
    let mut pi_values = pi_values;
    pi_values.truncate(pi_meta.size());

    Ok(ParsedSource {
        pi: RawTable {
            kind: TableKind::Pi,
            meta: pi_meta,
            values: RawValues::Integers(pi_values),
        },
        emc: RawTable {
            kind: TableKind::Emc,
            meta: emc_meta,
            values: RawValues::Decimals(emc_values),
        },
        mold: RawTable {
            kind: TableKind::Mold,
            meta: mold_meta,
            values: RawValues::Integers(mold_values),
        },
        pi_array_len,
        emc_array_len,
    })
}

fn cross_check(
    pi: &TableMeta,
    emc: &TableMeta,
    mold: &TableMeta,
    pi_array_len: usize,
    emc_array_len: usize,
) -> Result<()> {
    let expected = pi.size().saturating_add(mold.size());
    if expected != pi_array_len {
        return Err(TablesError::SizeMismatch {
            what: "pitable length (PI + mold cells)",
            expected,
            actual: pi_array_len,
        });
    }
    if pi.size() != mold.array_offset {
        return Err(TablesError::SizeMismatch {
            what: "mold offset inside pitable (PI cells)",
            expected: pi.size(),
            actual: mold.array_offset,
        });
    }
    if emc.size() != emc_array_len {
        return Err(TablesError::SizeMismatch {
            what: "emctable length (EMC cells)",
            expected: emc.size(),
            actual: emc_array_len,
        });
    }
    Ok(())
}

fn declared_len(source: &str, section: Section) -> Result<usize> {
    let caps = section.find_unique(source)?;
    let len: usize = number(&caps, "size", section)?;
    if len == 0 {
        return Err(TablesError::MalformedPayload {
            section,
            message: "declared array length is zero".to_string(),
        });
    }
    Ok(len)
}

fn pi_expr(caps: &Captures<'_>) -> Result<IndexExpr> {
    let section = Section::PiRanges;
    Ok(IndexExpr {
        temp_min: number(caps, "temp_min", section)?,
        temp_max: number(caps, "temp_max", section)?,
        temp_offset: Some(number(caps, "temp_offset", section)?),
        rh_size: number(caps, "rh_size", section)?,
        rh_min: Some(number(caps, "rh_min", section)?),
        rh_max: Some(number(caps, "rh_max", section)?),
        rh_offset: Some(number(caps, "rh_offset", section)?),
        array_offset: 0,
    })
}

fn emc_expr(caps: &Captures<'_>) -> Result<IndexExpr> {
    let section = Section::EmcRanges;
    Ok(IndexExpr {
        temp_min: number(caps, "temp_min", section)?,
        temp_max: number(caps, "temp_max", section)?,
        temp_offset: Some(number(caps, "temp_offset", section)?),
        rh_size: number(caps, "rh_size", section)?,
        ..IndexExpr::default()
    })
}

fn mold_expr(caps: &Captures<'_>) -> Result<IndexExpr> {
    let section = Section::MoldRanges;
    Ok(IndexExpr {
        temp_min: number(caps, "temp_min", section)?,
        temp_max: number(caps, "temp_max", section)?,
        temp_offset: Some(number(caps, "temp_offset", section)?),
        rh_size: number(caps, "rh_size", section)?,
        rh_min: Some(number(caps, "rh_min", section)?),
        rh_max: None,
        rh_offset: Some(number(caps, "rh_offset", section)?),
        array_offset: number(caps, "array_offset", section)?,
    })
}

/// Parse a captured integer; signed captures may contain inner whitespace (`- 6`).
fn number<N: std::str::FromStr>(caps: &Captures<'_>, group: &str, section: Section) -> Result<N>
where
    N::Err: fmt::Display,
{
    let raw = caps.name(group).map(|m| m.as_str()).unwrap_or_default();
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .parse()
        .map_err(|err| TablesError::MalformedPayload {
            section,
            message: format!("group `{group}` = {raw:?}: {err}"),
        })
}

fn payload<'s>(source: &'s str, section: Section) -> Result<Vec<&'s str>> {
    let caps = section.find_unique(source)?;
    let body = caps.name("values").map(|m| m.as_str()).unwrap_or_default();
    if body.trim().is_empty() {
        return Err(TablesError::MalformedPayload {
            section,
            message: "array literal is empty".to_string(),
        });
    }
    Ok(body.split(',').map(str::trim).collect())
}

fn integer_payload(source: &str, section: Section) -> Result<Vec<i32>> {
    payload(source, section)?
        .into_iter()
        .enumerate()
        .map(|(idx, token)| {
            token.parse().map_err(|_| TablesError::MalformedPayload {
                section,
                message: format!("element {idx} is not an integer: {token:?}"),
            })
        })
        .collect()
}

fn decimal_payload(source: &str, section: Section) -> Result<Vec<f64>> {
    payload(source, section)?
        .into_iter()
        .enumerate()
        .map(|(idx, token)| {
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(round_decimals)
                .ok_or_else(|| TablesError::MalformedPayload {
                    section,
                    message: format!("element {idx} is not a decimal: {token:?}"),
                })
        })
        .collect()
}

/// Round to [`EMC_DECIMALS`] places.
pub fn round_decimals(value: f64) -> f64 {
    let scale = 10f64.powi(EMC_DECIMALS);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr() -> IndexExpr {
        IndexExpr {
            temp_min: -23,
            temp_max: 65,
            temp_offset: Some(23),
            rh_size: 90,
            rh_min: Some(6),
            rh_max: Some(95),
            rh_offset: Some(-6),
            array_offset: 0,
        }
    }

    #[test]
    fn resolve_pi_like_expression() {
        let meta = expr().resolve(TableKind::Pi).unwrap();
        assert_eq!(meta.rows(), 89);
        assert_eq!(meta.cols(), 90);
        assert_eq!(meta.size(), 8010);
    }

    #[test]
    fn resolve_derives_full_humidity_span() {
        let meta = IndexExpr {
            temp_min: -20,
            temp_max: 65,
            temp_offset: Some(20),
            rh_size: 101,
            ..IndexExpr::default()
        }
        .resolve(TableKind::Emc)
        .unwrap();
        assert_eq!((meta.rh_min, meta.rh_max), (0, 100));
        assert_eq!(meta.size(), 8686);
    }

    #[test]
    fn resolve_derives_rh_max_from_minimum() {
        let meta = IndexExpr {
            temp_min: 2,
            temp_max: 45,
            temp_offset: Some(-2),
            rh_size: 36,
            rh_min: Some(65),
            rh_offset: Some(-65),
            array_offset: 8010,
            ..IndexExpr::default()
        }
        .resolve(TableKind::Mold)
        .unwrap();
        assert_eq!(meta.rh_max, 100);
        assert_eq!(meta.size(), 1584);
    }

    #[test]
    fn resolve_rejects_offset_that_does_not_cancel_minimum() {
        let err = IndexExpr {
            temp_offset: Some(22),
            ..expr()
        }
        .resolve(TableKind::Pi)
        .unwrap_err();
        assert!(
            err.to_string()
                .contains("temperature offset 22 does not cancel minimum -23"),
            "{err}"
        );

        let err = IndexExpr {
            rh_offset: Some(-5),
            ..expr()
        }
        .resolve(TableKind::Pi)
        .unwrap_err();
        assert!(matches!(
            err,
            TablesError::InvalidMetadata {
                table: TableKind::Pi,
                ..
            }
        ));
    }

    #[test]
    fn resolve_rejects_inconsistent_humidity_span() {
        let err = IndexExpr {
            rh_size: 91,
            ..expr()
        }
        .resolve(TableKind::Pi)
        .unwrap_err();
        assert!(err.to_string().contains("does not span 91 columns"), "{err}");
    }

    #[test]
    fn decimals_round_to_one_place() {
        assert_eq!(round_decimals(9.24), 9.2);
        assert_eq!(round_decimals(9.25), 9.3);
        assert_eq!(round_decimals(5.0), 5.0);
    }

    #[test]
    fn table_policies() {
        assert_eq!(TableKind::Pi.policy(), BoundaryPolicy::Clamp);
        assert_eq!(TableKind::Emc.policy(), BoundaryPolicy::Clamp);
        assert_eq!(TableKind::Mold.policy(), BoundaryPolicy::Raise);
    }
}
