#![deny(unsafe_code)]

use std::path::PathBuf;

use preserve_model::PreservationError;

use crate::parse::TableKind;
use crate::patterns::Section;

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("fetching {url} returned an empty body")]
    EmptyBody { url: String },

    #[error("section `{section}` not found in calculator source")]
    MissingSection { section: Section },

    #[error("section `{section}` matched {count} times in calculator source, expected once")]
    AmbiguousSection { section: Section, count: usize },

    #[error("malformed `{section}` payload: {message}")]
    MalformedPayload { section: Section, message: String },

    #[error("invalid {table} metadata: {message}")]
    InvalidMetadata { table: TableKind, message: String },

    #[error("{what}: expected {expected}, got {actual}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Table(#[from] PreservationError),

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode table artifact: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode table artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported table artifact {path}: schema {found} v{found_version}, expected {expected} v{expected_version}")]
    SchemaMismatch {
        path: PathBuf,
        found: String,
        found_version: u32,
        expected: &'static str,
        expected_version: u32,
    },

    #[error("table artifact {path} failed verification after writing: {message}")]
    Verification { path: PathBuf, message: String },

    #[error("lookup tables not generated at {path}: {reason}; run `preservation-calc generate`")]
    NotGenerated { path: PathBuf, reason: String },
}

impl TablesError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn metadata(table: TableKind, message: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            table,
            message: message.into(),
        }
    }

    /// True for failures reaching or reading the remote source.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::HttpStatus { .. } | Self::EmptyBody { .. }
        )
    }

    /// True when the calculator source no longer has the expected structure.
    pub fn is_extraction_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSection { .. }
                | Self::AmbiguousSection { .. }
                | Self::MalformedPayload { .. }
                | Self::InvalidMetadata { .. }
                | Self::SizeMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TablesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_generated_points_at_the_fix() {
        let err = TablesError::NotGenerated {
            path: PathBuf::from("tables/dp_tables.json"),
            reason: "file does not exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "lookup tables not generated at tables/dp_tables.json: file does not exist; run `preservation-calc generate`"
        );
    }

    #[test]
    fn classification() {
        let err = TablesError::MissingSection {
            section: Section::PiData,
        };
        assert!(err.is_extraction_error());
        assert!(!err.is_fetch_error());
        assert_eq!(
            err.to_string(),
            "section `pi_data` not found in calculator source"
        );

        let err = TablesError::HttpStatus {
            url: "http://localhost/dp.js".to_string(),
            status: 404,
        };
        assert!(err.is_fetch_error());
    }
}
