//! chunkers-model - Neural sentence and paragraph segmentation
//!
//! This crate runs the SaT ("Segment any Text") and WtP ("Where's the
//! Point") boundary models through ONNX Runtime and turns their
//! per-character boundary probabilities into sentences or paragraphs.
//!
//! # Features
//!
//! - Model catalog validation and Hugging Face hub downloads
//! - Subword (SaT) and hashed character (WtP) inputs
//! - Sliding-window inference with averaged overlaps for long texts
//! - Optional CUDA execution provider (`cuda` feature)
//!
//! # Example
//!
//! ```rust
//! use chunkers_model::{Chunker, Granularity, MockScorer, NeuralSplitter};
//!
//! let splitter = NeuralSplitter::with_scorer(Box::new(MockScorer), Granularity::Sentence, 0.25, 0.5);
//! let sentences = splitter.chunk("One sentence. Another one.").unwrap();
//! assert_eq!(sentences.len(), 2);
//! ```

mod catalog;
mod hashing;
mod onnx;
mod scorer;
mod segment;
mod splitter;

pub use catalog::{ModelFamily, ModelFiles, SAT_MODELS, WTP_MODELS};
pub use onnx::{SatScorer, WtpScorer};
pub use scorer::{BoundaryScorer, MockScorer};
pub use segment::{split_at_probabilities, ForcedBreaks};
pub use splitter::NeuralSplitter;

// Re-export the Chunker trait for convenience
pub use chunkers_core::{Chunker, Granularity};
