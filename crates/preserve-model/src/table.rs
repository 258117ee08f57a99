//! Two-dimensional lookup table indexed by (temperature, relative humidity).
//!
//! Rows are whole degrees Celsius, columns whole percent humidity. Both axes
//! start at an arbitrary minimum, so every lookup subtracts the axis minimum
//! before touching the backing storage. What happens to an index outside the
//! declared range is decided once, at construction, by [`BoundaryPolicy`].

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::error::{Axis, IndexRangeError, PreservationError, Result};

/// Handling of lookup indices outside a table's declared ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Reject out-of-range indices on both axes.
    #[default]
    Raise,
    /// Pin temperature to the nearest edge, reject humidity.
    ClampRows,
    /// Pin humidity to the nearest edge, reject temperature.
    ClampColumns,
    /// Pin both axes to the nearest edge.
    Clamp,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::Raise => "raise",
            BoundaryPolicy::ClampRows => "clamp_rows",
            BoundaryPolicy::ClampColumns => "clamp_columns",
            BoundaryPolicy::Clamp => "clamp",
        }
    }

    pub fn clamps_rows(&self) -> bool {
        matches!(self, BoundaryPolicy::ClampRows | BoundaryPolicy::Clamp)
    }

    pub fn clamps_columns(&self) -> bool {
        matches!(self, BoundaryPolicy::ClampColumns | BoundaryPolicy::Clamp)
    }

    fn clamps(&self, axis: Axis) -> bool {
        match axis {
            Axis::Temperature => self.clamps_rows(),
            Axis::Humidity => self.clamps_columns(),
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "raise" => Ok(BoundaryPolicy::Raise),
            "clamp_rows" | "clamp_x" => Ok(BoundaryPolicy::ClampRows),
            "clamp_columns" | "clamp_y" => Ok(BoundaryPolicy::ClampColumns),
            "clamp" => Ok(BoundaryPolicy::Clamp),
            _ => Err(format!("Unknown boundary policy: {s}")),
        }
    }
}

/// Round to the nearest integer, ties toward positive infinity.
///
/// This is JavaScript's `Math.round`: `2.5 -> 3`, `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> i32 {
    // `value - floor` is exact; `value + 0.5` is not (0.49999999999999994 + 0.5 == 1.0).
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

/// Immutable 2-D table with shifted integer indices.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable<T> {
    row_min: i32,
    col_min: i32,
    rows: usize,
    cols: usize,
    policy: BoundaryPolicy,
    data: Vec<T>,
}

impl<T> LookupTable<T> {
    /// Build a table from row-major `data`.
    ///
    /// Fails with [`PreservationError::ShapeMismatch`] when `data` does not
    /// hold exactly one value per (row, column) pair.
    pub fn new(
        data: Vec<T>,
        row_range: RangeInclusive<i32>,
        col_range: RangeInclusive<i32>,
        policy: BoundaryPolicy,
    ) -> Result<Self> {
        let rows = axis_len(Axis::Temperature, &row_range)?;
        let cols = axis_len(Axis::Humidity, &col_range)?;
        let expected = rows * cols;
        if data.len() != expected {
            return Err(PreservationError::ShapeMismatch {
                rows,
                cols,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            row_min: *row_range.start(),
            col_min: *col_range.start(),
            rows,
            cols,
            policy,
            data,
        })
    }

    /// Build a table from nested rows. Ragged input is rejected.
    pub fn from_rows(
        rows: Vec<Vec<T>>,
        row_min: i32,
        col_min: i32,
        policy: BoundaryPolicy,
    ) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);
        let data = flatten_rows(rows, row_count, col_count)?;
        Self::new(
            data,
            row_min..=row_min + row_count as i32 - 1,
            col_min..=col_min + col_count as i32 - 1,
            policy,
        )
    }

    pub fn row_min(&self) -> i32 {
        self.row_min
    }

    pub fn row_max(&self) -> i32 {
        self.row_min + self.rows as i32 - 1
    }

    pub fn col_min(&self) -> i32 {
        self.col_min
    }

    pub fn col_max(&self) -> i32 {
        self.col_min + self.cols as i32 - 1
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn row_range(&self) -> RangeInclusive<i32> {
        self.row_min..=self.row_max()
    }

    pub fn col_range(&self) -> RangeInclusive<i32> {
        self.col_min..=self.col_max()
    }

    /// Row-major backing storage.
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Values of one temperature row, addressed by its physical index.
    pub fn row(&self, temperature: i32) -> Option<&[T]> {
        if !self.row_range().contains(&temperature) {
            return None;
        }
        let start = (temperature - self.row_min) as usize * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Every cell as `(temperature, humidity, &value)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (i32, i32, &T)> + '_ {
        self.data.iter().enumerate().map(move |(idx, value)| {
            let row = (idx / self.cols) as i32 + self.row_min;
            let col = (idx % self.cols) as i32 + self.col_min;
            (row, col, value)
        })
    }

    /// Convert every value, keeping ranges and policy.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> LookupTable<U> {
        LookupTable {
            row_min: self.row_min,
            col_min: self.col_min,
            rows: self.rows,
            cols: self.cols,
            policy: self.policy,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// True when both raw values lie within the declared ranges.
    pub fn contains(&self, temperature: f64, humidity: f64) -> bool {
        in_range(temperature, self.row_min, self.row_max())
            && in_range(humidity, self.col_min, self.col_max())
    }

    /// Apply the boundary policy to one raw axis value.
    fn bound(&self, axis: Axis, value: f64) -> std::result::Result<f64, IndexRangeError> {
        let (min, max) = match axis {
            Axis::Temperature => (self.row_min, self.row_max()),
            Axis::Humidity => (self.col_min, self.col_max()),
        };
        if in_range(value, min, max) {
            return Ok(value);
        }
        if value.is_nan() || !self.policy.clamps(axis) {
            return Err(IndexRangeError::new(
                axis,
                value,
                f64::from(min),
                f64::from(max),
            ));
        }
        let pinned = if value < f64::from(min) { min } else { max };
        trace!(axis = %axis, value, pinned, "clamping lookup index");
        Ok(f64::from(pinned))
    }

    fn offset(&self, temperature: f64, humidity: f64) -> Result<usize> {
        let temperature = self.bound(Axis::Temperature, temperature)?;
        let humidity = self.bound(Axis::Humidity, humidity)?;
        let row = (round_half_up(temperature) - self.row_min) as usize;
        let col = (round_half_up(humidity) - self.col_min) as usize;
        Ok(row * self.cols + col)
    }
}

impl<T: Copy> LookupTable<T> {
    /// Value at integer (temperature, humidity).
    ///
    /// Out-of-range indices are pinned to the nearer edge on clamped axes
    /// and rejected with an [`IndexRangeError`] on raising axes.
    pub fn get(&self, temperature: i32, humidity: i32) -> Result<T> {
        self.lookup(f64::from(temperature), f64::from(humidity))
    }

    /// Value at continuous (temperature, humidity).
    ///
    /// The boundary policy is applied to the raw values first; the results
    /// are then rounded half-up onto the integer grid.
    pub fn lookup(&self, temperature: f64, humidity: f64) -> Result<T> {
        let offset = self.offset(temperature, humidity)?;
        Ok(self.data[offset])
    }
}

impl<T> fmt::Display for LookupTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "LookupTable {}x{} {} ({})",
            self.rows,
            self.cols,
            short_type_name::<T>(),
            self.policy
        )?;
        writeln!(f, "  temperature: {}..{}", self.row_min, self.row_max())?;
        write!(f, "  humidity: {}..{}", self.col_min, self.col_max())
    }
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

fn axis_len(axis: Axis, range: &RangeInclusive<i32>) -> Result<usize> {
    let (min, max) = (*range.start(), *range.end());
    if max < min {
        return Err(PreservationError::InvalidRange { axis, min, max });
    }
    Ok((i64::from(max) - i64::from(min) + 1) as usize)
}

/// Row-major storage from nested rows of exactly `rows x cols`.
fn flatten_rows<T>(nested: Vec<Vec<T>>, rows: usize, cols: usize) -> Result<Vec<T>> {
    if nested.len() != rows {
        return Err(PreservationError::ShapeMismatch {
            rows,
            cols,
            expected: rows * cols,
            actual: nested.iter().map(Vec::len).sum(),
        });
    }
    if let Some((row, values)) = nested.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(PreservationError::RaggedRow {
            row,
            expected: cols,
            actual: values.len(),
        });
    }
    Ok(nested.into_iter().flatten().collect())
}

fn in_range(value: f64, min: i32, max: i32) -> bool {
    value >= f64::from(min) && value <= f64::from(max)
}

/// Serialized form: ranges, policy and one array per temperature row.
#[derive(Serialize)]
struct TableReprRef<'a, T> {
    temperature: [i32; 2],
    humidity: [i32; 2],
    policy: BoundaryPolicy,
    rows: Vec<&'a [T]>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TableRepr<T> {
    temperature: [i32; 2],
    humidity: [i32; 2],
    policy: BoundaryPolicy,
    rows: Vec<Vec<T>>,
}

impl<T: Serialize> Serialize for LookupTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        TableReprRef {
            temperature: [self.row_min, self.row_max()],
            humidity: [self.col_min, self.col_max()],
            policy: self.policy,
            rows: self.data.chunks(self.cols).collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for LookupTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = TableRepr::<T>::deserialize(deserializer)?;
        let [row_min, row_max] = repr.temperature;
        let [col_min, col_max] = repr.humidity;
        let row_range = row_min..=row_max;
        let col_range = col_min..=col_max;
        let rows = axis_len(Axis::Temperature, &row_range).map_err(D::Error::custom)?;
        let cols = axis_len(Axis::Humidity, &col_range).map_err(D::Error::custom)?;
        let data = flatten_rows(repr.rows, rows, cols).map_err(D::Error::custom)?;
        LookupTable::new(data, row_range, col_range, repr.policy).map_err(D::Error::custom)
    }
}
