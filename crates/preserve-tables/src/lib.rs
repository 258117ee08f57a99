//! Lookup table extraction and persistence for the preservation calculator.
//!
//! The Image Permanence Institute's dew point calculator ships its data as
//! JavaScript arrays inside `dp.js`. This crate turns that script into typed
//! [`LookupTable`](preserve_model::LookupTable)s without executing it:
//!
//! 1. [`fetch`] retrieves the script (HTTP or a local copy).
//! 2. [`parse`] locates the array declarations and index arithmetic with
//!    the [`patterns`] and cross-checks the sizes they imply.
//! 3. [`tableset`] reshapes the flat arrays into the PI, EMC and mold tables
//!    with the calculator's boundary policies.
//! 4. [`artifact`] stores the tables as a deterministic JSON document that
//!    the runtime loads instead of re-parsing.
//!
//! [`generate::generate`] runs the whole pipeline.

#![deny(unsafe_code)]

pub mod artifact;
pub mod config;
pub mod error;
pub mod fetch;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
pub mod generate;
pub mod hash;
pub mod parse;
pub mod paths;
pub mod patterns;
pub mod tableset;

pub use crate::artifact::{
    ARTIFACT_SCHEMA, ARTIFACT_SCHEMA_VERSION, ArtifactReport, SourceInfo, TableArtifact,
    artifact_checksum, load_artifact, read_artifact, render_artifact, verify_artifact,
    write_artifact,
};
pub use crate::config::GenerateConfig;
pub use crate::error::{Result, TablesError};
pub use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_URL, SourceLocation, fetch_source};
pub use crate::generate::{GenerateReport, build_artifact, generate};
pub use crate::parse::{ParsedSource, RawTable, RawValues, TableKind, TableMeta, parse_source};
pub use crate::paths::{TABLES_ENV_VAR, default_artifact_path};
pub use crate::patterns::Section;
pub use crate::tableset::{TableSet, TableSummary};
