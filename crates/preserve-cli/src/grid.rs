//! Whole-domain dumps of one metric.
//!
//! One JSON object per line, temperature-major:
//! `{"t":-20,"rh":0,"value":300}`. Temperatures run over `-20..=65` and
//! humidities over `0..=100`, both in whole units.

use std::io::Write;
use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use preserve_core::Calculator;
use preserve_tables::TableKind;
use serde::Serialize;

pub const GRID_TEMPERATURES: RangeInclusive<i32> = -20..=65;
pub const GRID_HUMIDITIES: RangeInclusive<i32> = 0..=100;

#[derive(Debug, Serialize)]
struct GridPoint<V> {
    t: i32,
    rh: i32,
    value: V,
}

/// Write every grid point of `metric` to `out`; returns the number of lines.
pub fn write_grid<W: Write>(
    calculator: &Calculator,
    metric: TableKind,
    out: &mut W,
) -> Result<usize> {
    let mut lines = 0;
    for t in GRID_TEMPERATURES {
        for rh in GRID_HUMIDITIES {
            let (tf, rhf) = (f64::from(t), f64::from(rh));
            let line = match metric {
                TableKind::Pi => point_line(t, rh, calculator.pi(tf, rhf)?.value()),
                TableKind::Emc => point_line(t, rh, calculator.emc(tf, rhf)?.value()),
                TableKind::Mold => point_line(t, rh, calculator.mold(tf, rhf)?.value()),
            }?;
            writeln!(out, "{line}").context("write grid line")?;
            lines += 1;
        }
    }
    out.flush().context("flush grid output")?;
    Ok(lines)
}

fn point_line<V: Serialize>(t: i32, rh: i32, value: V) -> Result<String> {
    serde_json::to_string(&GridPoint { t, rh, value }).context("encode grid point")
}
