use preserve_model::{BoundaryPolicy, LookupTable};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TablesError};
use crate::parse::{ParsedSource, RawTable, RawValues, TableKind, round_decimals};

/// The three calculator tables, ready for lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSet {
    pub pi: LookupTable<i32>,
    pub emc: LookupTable<f64>,
    pub mold: LookupTable<i32>,
}

/// Shape and policy of one table, for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub kind: TableKind,
    pub temperature: (i32, i32),
    pub humidity: (i32, i32),
    pub rows: usize,
    pub cols: usize,
    pub policy: BoundaryPolicy,
}

impl TableSet {
    pub fn from_parsed(parsed: &ParsedSource) -> Result<Self> {
        let set = Self {
            pi: integer_table(&parsed.pi)?,
            emc: decimal_table(&parsed.emc)?,
            mold: integer_table(&parsed.mold)?,
        };
        set.check_policies()?;
        Ok(set)
    }

    /// Tables loaded from elsewhere must carry the calculator's policies.
    pub(crate) fn check_policies(&self) -> Result<()> {
        for kind in TableKind::ALL {
            let actual = self.policy(kind);
            if actual != kind.policy() {
                return Err(TablesError::metadata(
                    kind,
                    format!("boundary policy is {actual}, expected {}", kind.policy()),
                ));
            }
        }
        Ok(())
    }

    pub fn policy(&self, kind: TableKind) -> BoundaryPolicy {
        match kind {
            TableKind::Pi => self.pi.policy(),
            TableKind::Emc => self.emc.policy(),
            TableKind::Mold => self.mold.policy(),
        }
    }

    pub fn summaries(&self) -> Vec<TableSummary> {
        vec![
            summary(TableKind::Pi, &self.pi),
            summary(TableKind::Emc, &self.emc),
            summary(TableKind::Mold, &self.mold),
        ]
    }

    /// Number of cells over all tables.
    pub fn cell_count(&self) -> usize {
        self.pi.values().len() + self.emc.values().len() + self.mold.values().len()
    }
}

fn summary<T>(kind: TableKind, table: &LookupTable<T>) -> TableSummary {
    TableSummary {
        kind,
        temperature: (table.row_min(), table.row_max()),
        humidity: (table.col_min(), table.col_max()),
        rows: table.rows(),
        cols: table.cols(),
        policy: table.policy(),
    }
}

fn integer_table(raw: &RawTable) -> Result<LookupTable<i32>> {
    let RawValues::Integers(values) = &raw.values else {
        return Err(TablesError::metadata(
            raw.kind,
            "expected integer values, found decimals",
        ));
    };
    build(raw, values.clone())
}

fn decimal_table(raw: &RawTable) -> Result<LookupTable<f64>> {
    let values = match &raw.values {
        RawValues::Decimals(values) => values.iter().copied().map(round_decimals).collect(),
        RawValues::Integers(values) => values.iter().copied().map(f64::from).collect(),
    };
    build(raw, values)
}

fn build<T>(raw: &RawTable, values: Vec<T>) -> Result<LookupTable<T>> {
    let meta = &raw.meta;
    Ok(LookupTable::new(
        values,
        meta.temp_min..=meta.temp_max,
        meta.rh_min..=meta.rh_max,
        raw.kind.policy(),
    )?)
}
