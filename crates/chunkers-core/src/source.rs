//! Input detection and loading.
//!
//! Document readers accept a single string that may be a URL, a path to a
//! file on disk, or the document content itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, info};

use crate::config::FetchConfig;
use crate::error::{ChunkError, Result};

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Remote document, fetched with an HTTP GET.
    Url(String),

    /// Local file.
    Path(PathBuf),

    /// The input is the document content.
    Raw(String),
}

impl InputSource {
    /// Classify an input string.
    ///
    /// A path is only recognised when the file exists and its extension is
    /// in `extensions` (case-insensitive). An empty `extensions` accepts
    /// any existing file.
    pub fn detect(input: &str, extensions: &[&str]) -> Self {
        let trimmed = input.trim();

        if (trimmed.starts_with("http://") || trimmed.starts_with("https://"))
            && !trimmed.contains(char::is_whitespace)
            && Url::parse(trimmed).is_ok()
        {
            return Self::Url(trimmed.to_string());
        }

        // Multi-line input is never a path
        if !trimmed.is_empty() && !trimmed.contains('\n') {
            let path = Path::new(trimmed);
            if path.is_file() && has_extension(path, extensions) {
                return Self::Path(path.to_path_buf());
            }
        }

        Self::Raw(input.to_string())
    }

    /// Load the document as text.
    pub fn load_text(&self, fetch: &FetchConfig) -> Result<String> {
        match self {
            Self::Url(url) => {
                let bytes = fetch_bytes(url, fetch)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Self::Path(path) => {
                debug!("Reading {:?}", path);
                let bytes = std::fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Self::Raw(text) => Ok(text.clone()),
        }
    }

    /// Load the document as bytes, for binary formats.
    ///
    /// Raw input is rejected: binary documents must be a path or a URL.
    pub fn load_bytes(&self, fetch: &FetchConfig) -> Result<Vec<u8>> {
        match self {
            Self::Url(url) => fetch_bytes(url, fetch),
            Self::Path(path) => {
                debug!("Reading {:?}", path);
                Ok(std::fs::read(path)?)
            }
            Self::Raw(text) => Err(ChunkError::invalid_input(format!(
                "expected a file path or URL, got {} bytes of inline content",
                text.len()
            ))),
        }
    }

    /// Short description for log messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.display().to_string(),
            Self::Raw(text) => format!("<{} bytes of text>", text.len()),
        }
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// GET a URL and return the body. Non-2xx statuses are errors.
fn fetch_bytes(url: &str, fetch: &FetchConfig) -> Result<Vec<u8>> {
    info!("Fetching {}", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .user_agent(fetch.user_agent.clone())
        .build()
        .map_err(|e| ChunkError::fetch(url, e))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| ChunkError::fetch(url, e))?
        .error_for_status()
        .map_err(|e| ChunkError::fetch(url, e))?;

    let bytes = response.bytes().map_err(|e| ChunkError::fetch(url, e))?;
    debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}
