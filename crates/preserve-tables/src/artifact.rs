//! Persisted table artifact.
//!
//! Generation writes the parsed tables to a JSON document so the runtime
//! never touches the calculator source. The document is rendered
//! deterministically: struct field order is fixed, there are no timestamps
//! or maps, and identical inputs produce byte-identical files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TablesError};
use crate::hash::sha256_hex;
use crate::tableset::{TableSet, TableSummary};

pub const ARTIFACT_SCHEMA: &str = "preservation-calc.tables";
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

/// Provenance of the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    /// SHA-256 of the calculator source text.
    pub sha256: String,
    pub bytes: usize,
}

impl SourceInfo {
    pub fn from_text(url: impl Into<String>, text: &str) -> Self {
        Self {
            url: url.into(),
            sha256: sha256_hex(text.as_bytes()),
            bytes: text.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableArtifact {
    pub schema: String,
    pub schema_version: u32,
    pub initialized: bool,
    pub source: SourceInfo,
    pub tables: TableSet,
}

impl TableArtifact {
    pub fn new(source: SourceInfo, tables: TableSet) -> Self {
        Self {
            schema: ARTIFACT_SCHEMA.to_string(),
            schema_version: ARTIFACT_SCHEMA_VERSION,
            initialized: true,
            source,
            tables,
        }
    }
}

/// Fields checked before the tables are decoded.
#[derive(Deserialize)]
struct ArtifactHeader {
    schema: String,
    schema_version: u32,
    #[serde(default)]
    initialized: bool,
}

/// Result of verifying an artifact on disk.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub source: SourceInfo,
    pub checksum: String,
    pub cell_count: usize,
    pub tables: Vec<TableSummary>,
}

/// Pretty JSON with a trailing newline.
pub fn render_artifact(artifact: &TableArtifact) -> Result<String> {
    let mut out = serde_json::to_string_pretty(artifact).map_err(TablesError::Encode)?;
    out.push('\n');
    Ok(out)
}

/// SHA-256 of the rendered artifact.
pub fn artifact_checksum(artifact: &TableArtifact) -> Result<String> {
    Ok(sha256_hex(render_artifact(artifact)?.as_bytes()))
}

/// Write `artifact` to `path`.
///
/// Uses atomic write (temp file + rename) so readers never observe a
/// partially written artifact.
pub fn write_artifact(path: &Path, artifact: &TableArtifact) -> Result<()> {
    let rendered = render_artifact(artifact)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| TablesError::io("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    if let Err(err) = write_and_rename(&temp_path, path, rendered.as_bytes()) {
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }
        return Err(err);
    }

    info!(path = %path.display(), bytes = rendered.len(), "wrote table artifact");
    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| TablesError::io("create", temp_path, e))?;
    file.write_all(bytes)
        .map_err(|e| TablesError::io("write", temp_path, e))?;
    file.sync_all()
        .map_err(|e| TablesError::io("sync", temp_path, e))?;
    drop(file);

    fs::rename(temp_path, path).map_err(|e| TablesError::io("rename", temp_path, e))
}

/// Read and validate the artifact at `path`.
pub fn read_artifact(path: &Path) -> Result<TableArtifact> {
    if !path.exists() {
        return Err(TablesError::NotGenerated {
            path: path.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|e| TablesError::io("read", path, e))?;
    let json_error = |source| TablesError::Json {
        path: path.to_path_buf(),
        source,
    };

    let header: ArtifactHeader = serde_json::from_str(&contents).map_err(json_error)?;
    if header.schema != ARTIFACT_SCHEMA || header.schema_version != ARTIFACT_SCHEMA_VERSION {
        return Err(TablesError::SchemaMismatch {
            path: path.to_path_buf(),
            found: header.schema,
            found_version: header.schema_version,
            expected: ARTIFACT_SCHEMA,
            expected_version: ARTIFACT_SCHEMA_VERSION,
        });
    }
    if !header.initialized {
        return Err(TablesError::NotGenerated {
            path: path.to_path_buf(),
            reason: "artifact is a placeholder".to_string(),
        });
    }

    let artifact: TableArtifact = serde_json::from_str(&contents).map_err(json_error)?;
    artifact.tables.check_policies()?;
    debug!(path = %path.display(), cells = artifact.tables.cell_count(), "read table artifact");
    Ok(artifact)
}

/// Load the lookup tables stored at `path`.
pub fn load_artifact(path: &Path) -> Result<TableSet> {
    read_artifact(path).map(|artifact| artifact.tables)
}

/// Load `path` and describe what it holds.
pub fn verify_artifact(path: &Path) -> Result<ArtifactReport> {
    let artifact = read_artifact(path)?;
    let checksum = artifact_checksum(&artifact)?;
    Ok(ArtifactReport {
        path: path.to_path_buf(),
        cell_count: artifact.tables.cell_count(),
        tables: artifact.tables.summaries(),
        source: artifact.source,
        checksum,
    })
}
