//! Known models and where their files come from.

use std::path::{Path, PathBuf};

use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tracing::info;

use chunkers_core::{ChunkError, ModelConfig, Result};

/// SaT models published by the segment-any-text project.
pub const SAT_MODELS: &[&str] = &[
    "sat-1l",
    "sat-3l",
    "sat-3l-sm",
    "sat-3l-lora",
    "sat-6l",
    "sat-6l-sm",
    "sat-9l",
    "sat-9l-sm",
    "sat-12l",
    "sat-12l-sm",
    "sat-12l-lora",
];

/// WtP models.
pub const WTP_MODELS: &[&str] = &[
    "wtp-bert-tiny",
    "wtp-bert-mini",
    "wtp-canine-s-1l",
    "wtp-canine-s-1l-no-adapters",
    "wtp-canine-s-3l",
    "wtp-canine-s-3l-no-adapters",
    "wtp-canine-s-6l",
    "wtp-canine-s-6l-no-adapters",
    "wtp-canine-s-9l",
    "wtp-canine-s-9l-no-adapters",
    "wtp-canine-s-12l",
    "wtp-canine-s-12l-no-adapters",
];

/// ONNX file names tried in order, locally and on the hub.
const MODEL_FILES: &[&str] = &["model_optimized.onnx", "model.onnx"];

const TOKENIZER_FILE: &str = "tokenizer.json";

/// SaT models share the XLM-RoBERTa vocabulary.
const SAT_TOKENIZER_REPO: &str = "FacebookAI/xlm-roberta-base";

/// Segmentation model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    Sat,
    Wtp,
}

impl ModelFamily {
    /// Models accepted for this family.
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            Self::Sat => SAT_MODELS,
            Self::Wtp => WTP_MODELS,
        }
    }

    /// Model used when the configuration names none.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Sat => "sat-3l-sm",
            Self::Wtp => "wtp-bert-mini",
        }
    }

    /// Validate a configured model name, falling back to the default.
    pub fn select_model<'a>(&self, name: Option<&'a str>) -> Result<&'a str> {
        let name = name.unwrap_or(self.default_model());
        if self.models().contains(&name) {
            Ok(name)
        } else {
            Err(ChunkError::invalid_model(name, self.to_string()))
        }
    }

    /// Sentence threshold used when the configuration sets none.
    ///
    /// `-sm` SaT models are trained to be confident and use a higher cut.
    pub fn default_threshold(&self, model: &str) -> f32 {
        match self {
            Self::Sat if model.ends_with("-sm") => 0.25,
            Self::Sat => 0.025,
            Self::Wtp => 0.01,
        }
    }

    /// Hugging Face repository holding the model.
    pub fn hub_repo(&self, model: &str) -> String {
        match self {
            Self::Sat => format!("segment-any-text/{}", model),
            Self::Wtp => format!("benjamin/{}", model),
        }
    }

    /// Whether the model consumes subword tokens (and needs a tokenizer).
    pub fn needs_tokenizer(&self) -> bool {
        matches!(self, Self::Sat)
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sat => "SaT",
            Self::Wtp => "WtP",
        };
        write!(f, "{}", s)
    }
}

/// Resolved model files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    /// ONNX model.
    pub model: PathBuf,

    /// tokenizer.json, for families that need one.
    pub tokenizer: Option<PathBuf>,
}

impl ModelFiles {
    /// Locate the files for a model, from `model_dir` or the hub cache.
    pub fn resolve(family: ModelFamily, model: &str, config: &ModelConfig) -> Result<Self> {
        match &config.model_dir {
            Some(dir) => Self::from_dir(family, dir),
            None => Self::from_hub(family, model),
        }
    }

    /// Locate the files in a local directory.
    pub fn from_dir(family: ModelFamily, dir: &Path) -> Result<Self> {
        info!("Using local model directory {:?}", dir);

        let model = MODEL_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| ChunkError::model(format!("No ONNX model found in {:?}", dir)))?;

        let tokenizer = if family.needs_tokenizer() {
            let path = dir.join(TOKENIZER_FILE);
            if !path.is_file() {
                return Err(ChunkError::model(format!("Tokenizer not found at {:?}", path)));
            }
            Some(path)
        } else {
            None
        };

        Ok(Self { model, tokenizer })
    }

    /// Download (or reuse cached) files from the Hugging Face hub.
    pub fn from_hub(family: ModelFamily, model: &str) -> Result<Self> {
        let repo_id = family.hub_repo(model);
        info!("Resolving {} from the Hugging Face hub", repo_id);

        let api = Api::new().map_err(|e| ChunkError::model(format!("Failed to create hub client: {}", e)))?;
        let repo = api.repo(Repo::new(repo_id.clone(), RepoType::Model));

        let mut last_error = None;
        let mut model_path = None;
        for name in MODEL_FILES {
            match repo.get(name) {
                Ok(path) => {
                    model_path = Some(path);
                    break;
                }
                Err(e) => last_error = Some(e.to_string()),
            }
        }
        let model = model_path.ok_or_else(|| {
            ChunkError::model(format!(
                "No ONNX export of {} on the hub ({}); set model.model_dir to a local export",
                repo_id,
                last_error.unwrap_or_default()
            ))
        })?;

        let tokenizer = if family.needs_tokenizer() {
            let path = api
                .model(SAT_TOKENIZER_REPO.to_string())
                .get(TOKENIZER_FILE)
                .map_err(|e| ChunkError::model(format!("Failed to fetch tokenizer: {}", e)))?;
            Some(path)
        } else {
            None
        };

        Ok(Self { model, tokenizer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_model() {
        assert_eq!(ModelFamily::Sat.select_model(None).unwrap(), "sat-3l-sm");
        assert_eq!(ModelFamily::Wtp.select_model(None).unwrap(), "wtp-bert-mini");
        assert_eq!(ModelFamily::Sat.select_model(Some("sat-12l")).unwrap(), "sat-12l");

        let err = ModelFamily::Wtp.select_model(Some("sat-3l")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid WtP model: sat-3l");
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(ModelFamily::Sat.default_threshold("sat-3l-sm"), 0.25);
        assert_eq!(ModelFamily::Sat.default_threshold("sat-3l"), 0.025);
        assert_eq!(ModelFamily::Wtp.default_threshold("wtp-bert-mini"), 0.01);
    }

    #[test]
    fn test_hub_repo() {
        assert_eq!(ModelFamily::Sat.hub_repo("sat-1l"), "segment-any-text/sat-1l");
        assert_eq!(ModelFamily::Wtp.hub_repo("wtp-bert-tiny"), "benjamin/wtp-bert-tiny");
    }

    #[test]
    fn test_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("model.onnx"), b"onnx").unwrap();

        let files = ModelFiles::from_dir(ModelFamily::Wtp, dir.path()).unwrap();
        assert_eq!(files.model, dir.path().join("model.onnx"));
        assert!(files.tokenizer.is_none());

        // SaT needs the tokenizer as well
        let err = ModelFiles::from_dir(ModelFamily::Sat, dir.path()).unwrap_err();
        assert!(err.to_string().contains("Tokenizer not found"));

        std::fs::write(dir.path().join("tokenizer.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("model_optimized.onnx"), b"onnx").unwrap();
        let files = ModelFiles::from_dir(ModelFamily::Sat, dir.path()).unwrap();
        assert_eq!(files.model, dir.path().join("model_optimized.onnx"));
        assert_eq!(files.tokenizer, Some(dir.path().join("tokenizer.json")));
    }

    #[test]
    fn test_from_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelFiles::from_dir(ModelFamily::Wtp, dir.path()).unwrap_err();
        assert_eq!(err.error_code(), "MODEL_ERROR");
    }
}
