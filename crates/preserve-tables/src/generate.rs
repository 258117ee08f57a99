//! Table generation pipeline: source text to verified artifact.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, info_span};

use crate::artifact::{
    SourceInfo, TableArtifact, artifact_checksum, read_artifact, write_artifact,
};
use crate::config::GenerateConfig;
use crate::error::{Result, TablesError};
use crate::parse::parse_source;
use crate::tableset::{TableSet, TableSummary};

/// Outcome of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub source: SourceInfo,
    pub checksum: String,
    pub tables: Vec<TableSummary>,
}

/// Parse `text` and wrap the resulting tables in an artifact.
pub fn build_artifact(text: &str, origin: &str) -> Result<TableArtifact> {
    let parsed = info_span!("parse").in_scope(|| parse_source(text))?;
    let tables = TableSet::from_parsed(&parsed)?;
    Ok(TableArtifact::new(SourceInfo::from_text(origin, text), tables))
}

/// Load the source, build the tables, write the artifact and read it back.
pub fn generate(config: &GenerateConfig) -> Result<GenerateReport> {
    let location = config.source();
    let span = info_span!("generate", source = %location, output = %config.output.display());
    let _guard = span.enter();

    let text = location.load(config.timeout)?;
    let artifact = build_artifact(&text, &location.to_string())?;
    write_artifact(&config.output, &artifact)?;

    let reloaded = read_artifact(&config.output)?;
    if reloaded.tables != artifact.tables {
        return Err(TablesError::Verification {
            path: config.output.clone(),
            message: "reloaded tables differ from the generated tables".to_string(),
        });
    }
    let checksum = artifact_checksum(&reloaded)?;

    info!(
        cells = artifact.tables.cell_count(),
        checksum = %checksum,
        "generated lookup tables"
    );
    Ok(GenerateReport {
        output: config.output.clone(),
        tables: artifact.tables.summaries(),
        source: artifact.source,
        checksum,
    })
}
