//! Configuration types for doc-chunkers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration shared by every splitter.
///
/// Each splitter reads only the sections it needs, so one configuration
/// can be handed to any of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkersConfig {
    /// Neural segmentation model configuration.
    #[serde(default)]
    pub model: ModelConfig,

    /// Rule-based text splitting configuration.
    #[serde(default)]
    pub text: TextConfig,

    /// Paragraph filtering for document readers.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Remote document fetching.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Neural segmentation model configuration (SaT / WtP).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name, e.g. `sat-3l-sm`. Unset selects the family default.
    #[serde(default)]
    pub name: Option<String>,

    /// Run inference with the CUDA execution provider.
    #[serde(default)]
    pub use_cuda: bool,

    /// Use ONNX inference. Only ONNX is available; `false` is ignored.
    #[serde(default = "default_true")]
    pub use_onnx: bool,

    /// Local directory with `model.onnx` (and `tokenizer.json` for SaT).
    /// Unset downloads from the Hugging Face hub.
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// Sentence boundary threshold. Unset selects the model default.
    #[serde(default)]
    pub threshold: Option<f32>,

    /// Paragraph boundary threshold.
    #[serde(default = "default_paragraph_threshold")]
    pub paragraph_threshold: f32,

    /// Inference window size (tokens for SaT, characters for WtP).
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Overlap between consecutive windows.
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Number of threads for CPU inference.
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: None,
            use_cuda: false,
            use_onnx: default_true(),
            model_dir: None,
            threshold: None,
            paragraph_threshold: default_paragraph_threshold(),
            block_size: default_block_size(),
            stride: default_stride(),
            num_threads: default_num_threads(),
        }
    }
}

/// Rule-based text splitting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// ISO 639-1 language code for the rule-based sentence splitter.
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
        }
    }
}

/// Paragraph filtering applied by document readers.
///
/// `bad_words` and `stop_words` left unset use the reader's own defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum number of significant words for a paragraph to be kept.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Paragraphs containing any of these words are dropped.
    #[serde(default)]
    pub bad_words: Option<Vec<String>>,

    /// Words that do not count towards `min_words`.
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            bad_words: None,
            stop_words: None,
        }
    }
}

/// Remote document fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions

fn default_true() -> bool {
    true
}

fn default_paragraph_threshold() -> f32 {
    0.5
}

fn default_block_size() -> usize {
    512
}

fn default_stride() -> usize {
    64
}

fn default_num_threads() -> usize {
    4
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_min_words() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("doc-chunkers/", env!("CARGO_PKG_VERSION")).to_string()
}

impl ChunkersConfig {
    /// Load configuration from file.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> crate::error::Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            crate::error::ChunkError::config(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default paths.
    pub fn load_default() -> crate::error::Result<Self> {
        // Try user config first
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("doc-chunkers").join("config.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        // Try local config
        let local_config = PathBuf::from("doc-chunkers.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        Ok(Self::default())
    }

    /// Check values that would make inference windows meaningless.
    pub fn validate(&self) -> crate::error::Result<()> {
        let model = &self.model;
        if model.block_size < 8 {
            return Err(crate::error::ChunkError::config(format!(
                "model.block_size must be at least 8, got {}",
                model.block_size
            )));
        }
        if model.stride >= model.block_size / 2 {
            return Err(crate::error::ChunkError::config(format!(
                "model.stride ({}) must be less than half of model.block_size ({})",
                model.stride, model.block_size
            )));
        }
        if let Some(threshold) = model.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(crate::error::ChunkError::config(format!(
                    "model.threshold must be within 0..=1, got {}",
                    threshold
                )));
            }
        }
        if !(0.0..=1.0).contains(&model.paragraph_threshold) {
            return Err(crate::error::ChunkError::config(format!(
                "model.paragraph_threshold must be within 0..=1, got {}",
                model.paragraph_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkersConfig::default();
        assert_eq!(config.text.lang, "en");
        assert_eq!(config.model.block_size, 512);
        assert!(config.model.use_onnx);
        assert!(!config.model.use_cuda);
        assert_eq!(config.filter.min_words, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_matches_empty_toml() {
        let defaults = ChunkersConfig::default();
        let parsed = ChunkersConfig::from_toml("[model]\n[text]\n[filter]\n[fetch]\n").unwrap();

        assert_eq!(parsed.model.use_onnx, defaults.model.use_onnx);
        assert_eq!(parsed.model.paragraph_threshold, defaults.model.paragraph_threshold);
        assert_eq!(parsed.model.block_size, defaults.model.block_size);
        assert_eq!(parsed.model.stride, defaults.model.stride);
        assert_eq!(parsed.model.num_threads, defaults.model.num_threads);
        assert_eq!(parsed.text.lang, defaults.text.lang);
        assert_eq!(parsed.filter.min_words, defaults.filter.min_words);
        assert_eq!(parsed.fetch.timeout_secs, defaults.fetch.timeout_secs);
        assert_eq!(parsed.fetch.user_agent, defaults.fetch.user_agent);
    }

    #[test]
    fn test_partial_toml() {
        let config = ChunkersConfig::from_toml(
            r#"
            [model]
            name = "sat-12l-sm"
            use_cuda = true

            [text]
            lang = "de"
            "#,
        )
        .unwrap();

        assert_eq!(config.model.name.as_deref(), Some("sat-12l-sm"));
        assert!(config.model.use_cuda);
        assert_eq!(config.model.paragraph_threshold, 0.5);
        assert_eq!(config.text.lang, "de");
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_stride() {
        let err = ChunkersConfig::from_toml(
            r#"
            [model]
            block_size = 64
            stride = 40
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_invalid_toml() {
        let err = ChunkersConfig::from_toml("model = 3").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[filter]\nmin_words = 2\nbad_words = [\"cookie\"]\n").unwrap();

        let config = ChunkersConfig::load(&path).unwrap();
        assert_eq!(config.filter.min_words, 2);
        assert_eq!(config.filter.bad_words, Some(vec!["cookie".to_string()]));
        assert!(config.filter.stop_words.is_none());
    }
}
