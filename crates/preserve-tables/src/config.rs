use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_URL, SourceLocation};
use crate::paths::default_artifact_path;

/// Options for one table generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Remote calculator script, used unless `source_path` is set.
    pub url: String,
    /// Local copy of the calculator script.
    pub source_path: Option<PathBuf>,
    /// Artifact destination.
    pub output: PathBuf,
    pub timeout: Duration,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            source_path: None,
            output: default_artifact_path(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GenerateConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Local file wins over the URL.
    pub fn source(&self) -> SourceLocation {
        match &self.source_path {
            Some(path) => SourceLocation::File(path.clone()),
            None => SourceLocation::Url(self.url.clone()),
        }
    }
}
