//! Error types for doc-chunkers.

use thiserror::Error;

/// Result type alias using ChunkError.
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors that can occur while loading or chunking a document.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Input could not be interpreted for the requested splitter.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Model name is not part of the family's catalog.
    #[error("Invalid {family} model: {model}")]
    InvalidModel { model: String, family: String },

    /// No rules are available for the requested language.
    #[error("Unsupported language: {lang}")]
    UnsupportedLanguage { lang: String },

    /// Failed to fetch a remote document.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Failed to extract text from a document format.
    #[error("Failed to extract {format} text: {reason}")]
    Extraction { format: String, reason: String },

    /// Segmentation model error (loading or inference).
    #[error("Model error: {message}")]
    Model { message: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (unexpected).
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ChunkError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an invalid model error.
    pub fn invalid_model(model: impl Into<String>, family: impl Into<String>) -> Self {
        Self::InvalidModel {
            model: model.into(),
            family: family.into(),
        }
    }

    /// Create a fetch error.
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an extraction error.
    pub fn extraction(format: impl ToString, reason: impl ToString) -> Self {
        Self::Extraction {
            format: format.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a model error.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get a stable error code, used by the CLI's JSON output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::InvalidModel { .. } => "INVALID_MODEL",
            Self::UnsupportedLanguage { .. } => "UNSUPPORTED_LANGUAGE",
            Self::Fetch { .. } => "FETCH_FAILED",
            Self::Extraction { .. } => "EXTRACTION_FAILED",
            Self::Model { .. } => "MODEL_ERROR",
            Self::Config { .. } => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChunkError::invalid_model("sat-99l", "SaT");
        assert_eq!(err.to_string(), "Invalid SaT model: sat-99l");

        let err = ChunkError::fetch("https://example.com", "404 Not Found");
        assert!(err.to_string().contains("https://example.com"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ChunkError::UnsupportedLanguage {
                lang: "xx".to_string()
            }
            .error_code(),
            "UNSUPPORTED_LANGUAGE"
        );
        assert_eq!(ChunkError::model("boom").error_code(), "MODEL_ERROR");
        assert_eq!(
            ChunkError::extraction("pdf", "bad xref").error_code(),
            "EXTRACTION_FAILED"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ChunkError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
