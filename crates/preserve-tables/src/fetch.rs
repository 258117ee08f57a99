//! Retrieval of the calculator source text.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info};

use crate::error::{Result, TablesError};

/// Published location of the dew point calculator script.
pub const DEFAULT_URL: &str = "http://www.dpcalc.org/dp.js";

/// HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where calculator source text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl SourceLocation {
    /// Read the full source text.
    pub fn load(&self, timeout: Duration) -> Result<String> {
        match self {
            SourceLocation::Url(url) => fetch_source(url, timeout),
            SourceLocation::File(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| TablesError::io("read", path, e))?;
                info!(path = %path.display(), bytes = text.len(), "read calculator source");
                Ok(text)
            }
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(url) => write!(f, "{url}"),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// GET `url` and return the body as text.
///
/// Transport failures, non-success statuses and empty bodies are errors.
pub fn fetch_source(url: &str, timeout: Duration) -> Result<String> {
    let fetch_error = |source| TablesError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_error)?;

    debug!(url, ?timeout, "fetching calculator source");
    let response = client
        .get(url)
        .header(
            USER_AGENT,
            concat!("preservation-calc/", env!("CARGO_PKG_VERSION")),
        )
        .send()
        .map_err(fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(TablesError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let text = response.text().map_err(fetch_error)?;
    if text.trim().is_empty() {
        return Err(TablesError::EmptyBody {
            url: url.to_string(),
        });
    }
    info!(url, bytes = text.len(), "fetched calculator source");
    Ok(text)
}
