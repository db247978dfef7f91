//! Legacy Word (.doc) extraction through the `antiword` program.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use chunkers_core::{ChunkError, DocumentFormat, FetchConfig, InputSource, Result};

use crate::extract::TextExtractor;

const DEFAULT_PROGRAM: &str = "antiword";

/// Extracts .doc text by running antiword.
#[derive(Debug, Clone)]
pub struct DocExtractor {
    program: String,
}

impl DocExtractor {
    /// Use `antiword` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Use a specific converter executable. It must take the document path
    /// as its only argument and print plain text to stdout.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the converter on a file.
    pub fn extract_file(&self, path: &Path) -> Result<String> {
        debug!("Running {} on {:?}", self.program, path);

        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .map_err(|e| ChunkError::extraction(DocumentFormat::Doc, format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChunkError::extraction(
                DocumentFormat::Doc,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for DocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DocExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Doc
    }

    fn extract(&self, source: &InputSource, fetch: &FetchConfig) -> Result<String> {
        match source {
            InputSource::Path(path) => self.extract_file(path),
            _ => {
                // Remote documents are staged on disk for the converter
                let bytes = source.load_bytes(fetch)?;
                let mut staged = tempfile::Builder::new().suffix(".doc").tempfile()?;
                staged.write_all(&bytes)?;
                staged.flush()?;
                self.extract_file(staged.path())
            }
        }
    }
}
