//! ONNX Runtime boundary scorers.

use std::path::Path;
use std::sync::Mutex;

use ndarray::ArrayViewD;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use chunkers_core::{ChunkError, ModelConfig, Result};

use crate::catalog::{ModelFamily, ModelFiles};
use crate::hashing::{hash_encode, NUM_HASHES};
use crate::scorer::{average_windows, sigmoid, BoundaryScorer};

/// Output column holding the newline (boundary) logit.
const BOUNDARY_COLUMN: usize = 0;

/// Build an inference session for a model file.
fn build_session(model_path: &Path, config: &ModelConfig) -> Result<Session> {
    info!("Loading ONNX model from {:?}", model_path);

    if !config.use_onnx {
        warn!("model.use_onnx = false is not supported, running the ONNX export");
    }

    let builder = Session::builder()
        .map_err(|e| ChunkError::model(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| ChunkError::model(format!("Failed to set optimization level: {}", e)))?
        .with_intra_threads(config.num_threads)
        .map_err(|e| ChunkError::model(format!("Failed to set thread count: {}", e)))?;

    let mut builder = if config.use_cuda {
        #[cfg(feature = "cuda")]
        {
            info!("Configuring CUDA execution provider");
            let cuda = ort::execution_providers::CUDAExecutionProvider::default().build();
            builder
                .with_execution_providers([cuda])
                .map_err(|e| ChunkError::model(format!("Failed to register CUDA provider: {}", e)))?
        }
        #[cfg(not(feature = "cuda"))]
        {
            warn!("CUDA requested but doc-chunkers was built without the cuda feature, using CPU");
            builder
        }
    } else {
        builder
    };

    builder
        .commit_from_file(model_path)
        .map_err(|e| ChunkError::model(format!("Failed to load model: {}", e)))
}

/// Read the boundary column of a `[1, seq, labels]` (or `[1, seq]`) logits view.
fn boundary_logits(view: &ArrayViewD<'_, f32>, len: usize) -> Result<Vec<f32>> {
    let shape = view.shape().to_vec();
    debug!("Output shape: {:?}", shape);

    match shape.as_slice() {
        [1, seq, _labels] if *seq >= len => Ok((0..len).map(|k| view[[0, k, BOUNDARY_COLUMN]]).collect()),
        [1, seq] if *seq >= len => Ok((0..len).map(|k| view[[0, k]]).collect()),
        _ => Err(ChunkError::model(format!(
            "Unexpected output shape {:?} for {} positions",
            shape, len
        ))),
    }
}

/// SaT scorer: subword tokens framed by `<s>` / `</s>`.
pub struct SatScorer {
    /// ONNX inference session (wrapped in Mutex for interior mutability).
    session: Mutex<Session>,

    /// XLM-RoBERTa tokenizer.
    tokenizer: Tokenizer,

    model_name: String,
    block_size: usize,
    stride: usize,
    bos_id: u32,
    eos_id: u32,
}

impl SatScorer {
    /// Load a SaT model by name, validating it against the catalog.
    pub fn load(model: Option<&str>, config: &ModelConfig) -> Result<Self> {
        let family = ModelFamily::Sat;
        let model = family.select_model(model)?;
        let files = ModelFiles::resolve(family, model, config)?;
        let tokenizer_path = files
            .tokenizer
            .as_ref()
            .ok_or_else(|| ChunkError::internal("SaT model resolved without a tokenizer"))?;
        Self::from_files(model, &files.model, tokenizer_path, config)
    }

    /// Create a scorer from model and tokenizer paths.
    pub fn from_files(
        model_name: &str,
        model_path: impl AsRef<Path>,
        tokenizer_path: impl AsRef<Path>,
        config: &ModelConfig,
    ) -> Result<Self> {
        let session = build_session(model_path.as_ref(), config)?;

        info!("Loading tokenizer from {:?}", tokenizer_path.as_ref());
        let tokenizer = Tokenizer::from_file(tokenizer_path.as_ref())
            .map_err(|e| ChunkError::model(format!("Failed to load tokenizer: {}", e)))?;

        let bos_id = tokenizer.token_to_id("<s>").unwrap_or(0);
        let eos_id = tokenizer.token_to_id("</s>").unwrap_or(2);

        info!(
            "SaT scorer initialized: model={}, block_size={}, stride={}",
            model_name, config.block_size, config.stride
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            model_name: model_name.to_string(),
            block_size: config.block_size,
            stride: config.stride,
            bos_id,
            eos_id,
        })
    }

    /// Logits for one window of token ids (without special tokens).
    fn score_block(&self, ids: &[u32]) -> Result<Vec<f32>> {
        let len = ids.len() + 2;
        let mut input_ids = Vec::with_capacity(len);
        input_ids.push(self.bos_id as i64);
        input_ids.extend(ids.iter().map(|&id| id as i64));
        input_ids.push(self.eos_id as i64);
        let attention_mask = vec![1i64; len];

        let input_ids_tensor = Tensor::from_array((vec![1, len], input_ids))
            .map_err(|e| ChunkError::model(format!("Failed to create input tensor: {}", e)))?;
        let attention_mask_tensor = Tensor::from_array((vec![1, len], attention_mask))
            .map_err(|e| ChunkError::model(format!("Failed to create mask tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| ChunkError::model(format!("Failed to lock session: {}", e)))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            ])
            .map_err(|e| ChunkError::model(format!("Inference failed: {}", e)))?;

        let (_, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| ChunkError::model("No output tensor found"))?;
        let view = output
            .try_extract_array::<f32>()
            .map_err(|e| ChunkError::model(format!("Failed to extract tensor: {}", e)))?;

        // Drop the <s> position; </s> falls off the end
        let logits = boundary_logits(&view, len)?;
        Ok(logits[1..len - 1].to_vec())
    }
}

impl BoundaryScorer for SatScorer {
    fn char_probabilities(&self, text: &str) -> Result<Vec<f32>> {
        let n_chars = text.chars().count();
        let encoding = self
            .tokenizer
            .encode_char_offsets(text, false)
            .map_err(|e| ChunkError::model(format!("Tokenization failed: {}", e)))?;

        let ids = encoding.get_ids();
        let offsets = encoding.get_offsets();
        let mut probs = vec![0.0f32; n_chars];
        if ids.is_empty() {
            return Ok(probs);
        }

        let content = self.block_size.saturating_sub(2).max(1);
        debug!("Scoring {} tokens in windows of {}", ids.len(), content);
        let logits = average_windows(ids.len(), content, self.stride, |range| self.score_block(&ids[range]))?;

        // A token's probability belongs to its last character
        for (logit, &(start, end)) in logits.iter().zip(offsets) {
            if end > start && end <= n_chars {
                let p = sigmoid(*logit);
                if p > probs[end - 1] {
                    probs[end - 1] = p;
                }
            }
        }
        Ok(probs)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// WtP scorer: hashed character ids, one position per character.
pub struct WtpScorer {
    /// ONNX inference session (wrapped in Mutex for interior mutability).
    session: Mutex<Session>,

    model_name: String,
    block_size: usize,
    stride: usize,
}

impl WtpScorer {
    /// Load a WtP model by name, validating it against the catalog.
    pub fn load(model: Option<&str>, config: &ModelConfig) -> Result<Self> {
        let family = ModelFamily::Wtp;
        let model = family.select_model(model)?;
        if !model.contains("bert") && config.model_dir.is_none() {
            warn!("{} has no published ONNX export; set model.model_dir to a local export", model);
        }
        let files = ModelFiles::resolve(family, model, config)?;
        Self::from_file(model, &files.model, config)
    }

    /// Create a scorer from a model path.
    pub fn from_file(model_name: &str, model_path: impl AsRef<Path>, config: &ModelConfig) -> Result<Self> {
        let session = build_session(model_path.as_ref(), config)?;

        info!(
            "WtP scorer initialized: model={}, block_size={}, stride={}",
            model_name, config.block_size, config.stride
        );

        Ok(Self {
            session: Mutex::new(session),
            model_name: model_name.to_string(),
            block_size: config.block_size,
            stride: config.stride,
        })
    }

    /// Logits for one window of code points.
    fn score_block(&self, codes: &[u32]) -> Result<Vec<f32>> {
        let len = codes.len();
        let hashed_ids = hash_encode(codes);
        let attention_mask = vec![1.0f32; len];

        let hashed_tensor = Tensor::from_array((vec![1, len, NUM_HASHES], hashed_ids))
            .map_err(|e| ChunkError::model(format!("Failed to create input tensor: {}", e)))?;
        let attention_mask_tensor = Tensor::from_array((vec![1, len], attention_mask))
            .map_err(|e| ChunkError::model(format!("Failed to create mask tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| ChunkError::model(format!("Failed to lock session: {}", e)))?;

        let outputs = session
            .run(ort::inputs![
                "hashed_ids" => hashed_tensor,
                "attention_mask" => attention_mask_tensor
            ])
            .map_err(|e| ChunkError::model(format!("Inference failed: {}", e)))?;

        let (_, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| ChunkError::model("No output tensor found"))?;
        let view = output
            .try_extract_array::<f32>()
            .map_err(|e| ChunkError::model(format!("Failed to extract tensor: {}", e)))?;

        boundary_logits(&view, len)
    }
}

impl BoundaryScorer for WtpScorer {
    fn char_probabilities(&self, text: &str) -> Result<Vec<f32>> {
        let codes: Vec<u32> = text.chars().map(|c| c as u32).collect();
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Scoring {} characters in windows of {}", codes.len(), self.block_size);
        let logits = average_windows(codes.len(), self.block_size, self.stride, |range| {
            self.score_block(&codes[range])
        })?;
        Ok(logits.into_iter().map(sigmoid).collect())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
