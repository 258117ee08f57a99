use preserve_model::{IndexRangeError, PreservationError};
use preserve_tables::TablesError;
use thiserror::Error;

use crate::scale::TemperatureScale;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Preservation(#[from] PreservationError),

    #[error(transparent)]
    Tables(#[from] TablesError),

    #[error("{value} {} is below absolute zero", .scale.symbol())]
    BelowAbsoluteZero { value: f64, scale: TemperatureScale },
}

impl From<IndexRangeError> for CoreError {
    fn from(err: IndexRangeError) -> Self {
        Self::Preservation(err.into())
    }
}

impl CoreError {
    /// The range violation behind this error, if any.
    pub fn as_index_range(&self) -> Option<&IndexRangeError> {
        match self {
            Self::Preservation(err) => err.as_index_range(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
