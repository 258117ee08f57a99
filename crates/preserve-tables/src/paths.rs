//! Table artifact path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the table artifact location.
pub const TABLES_ENV_VAR: &str = "PRESERVATION_TABLES";

/// File name of the generated artifact.
pub const ARTIFACT_FILE_NAME: &str = "dp_tables.json";

/// Get the table artifact path.
///
/// Resolution order:
/// 1. `PRESERVATION_TABLES` environment variable
/// 2. `tables/dp_tables.json` relative to workspace root
pub fn default_artifact_path() -> PathBuf {
    if let Ok(path) = std::env::var(TABLES_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tables")
        .join(ARTIFACT_FILE_NAME)
}
