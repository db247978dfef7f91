//! Chunker over a boundary scorer.

use tracing::debug;

use chunkers_core::{ChunkError, Chunker, Granularity, ModelConfig, Result};

use crate::catalog::ModelFamily;
use crate::onnx::{SatScorer, WtpScorer};
use crate::scorer::BoundaryScorer;
use crate::segment::{split_at_probabilities, ForcedBreaks};

/// Sentence or paragraph splitter backed by a neural boundary model.
pub struct NeuralSplitter {
    scorer: Box<dyn BoundaryScorer>,
    granularity: Granularity,
    threshold: f32,
    paragraph_threshold: f32,
}

impl NeuralSplitter {
    /// Create a SaT splitter from the model configuration.
    pub fn sat(config: &ModelConfig, granularity: Granularity) -> Result<Self> {
        Self::load(ModelFamily::Sat, config, granularity)
    }

    /// Create a WtP splitter from the model configuration.
    pub fn wtp(config: &ModelConfig, granularity: Granularity) -> Result<Self> {
        Self::load(ModelFamily::Wtp, config, granularity)
    }

    /// Load the configured model of a family.
    pub fn load(family: ModelFamily, config: &ModelConfig, granularity: Granularity) -> Result<Self> {
        let model = family.select_model(config.name.as_deref())?;
        let threshold = config
            .threshold
            .unwrap_or_else(|| family.default_threshold(model));

        let scorer: Box<dyn BoundaryScorer> = match family {
            ModelFamily::Sat => Box::new(SatScorer::load(Some(model), config)?),
            ModelFamily::Wtp => Box::new(WtpScorer::load(Some(model), config)?),
        };

        Ok(Self::with_scorer(
            scorer,
            granularity,
            threshold,
            config.paragraph_threshold,
        ))
    }

    /// Create a splitter around any scorer.
    pub fn with_scorer(
        scorer: Box<dyn BoundaryScorer>,
        granularity: Granularity,
        threshold: f32,
        paragraph_threshold: f32,
    ) -> Self {
        Self {
            scorer,
            granularity,
            threshold,
            paragraph_threshold,
        }
    }

    /// Name of the model doing the scoring.
    pub fn model_name(&self) -> &str {
        self.scorer.model_name()
    }

    /// Threshold applied for the configured granularity.
    pub fn active_threshold(&self) -> f32 {
        match self.granularity {
            Granularity::Sentence => self.threshold,
            Granularity::Paragraph => self.paragraph_threshold,
        }
    }
}

impl Chunker for NeuralSplitter {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let probs = self.scorer.char_probabilities(input)?;
        if probs.iter().any(|p| p.is_nan()) {
            return Err(ChunkError::model(format!(
                "{} produced NaN probabilities",
                self.scorer.model_name()
            )));
        }

        let forced = match self.granularity {
            Granularity::Sentence => ForcedBreaks::Newline,
            Granularity::Paragraph => ForcedBreaks::BlankLine,
        };
        let chunks = split_at_probabilities(input, &probs, self.active_threshold(), forced)?;

        debug!(
            "{} split {} chars into {} {}s",
            self.scorer.model_name(),
            probs.len(),
            chunks.len(),
            self.granularity
        );
        Ok(chunks)
    }

    fn granularity(&self) -> Granularity {
        self.granularity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::MockScorer;

    struct NanScorer;

    impl BoundaryScorer for NanScorer {
        fn char_probabilities(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![f32::NAN; text.chars().count()])
        }

        fn model_name(&self) -> &str {
            "nan"
        }
    }

    fn mock(granularity: Granularity) -> NeuralSplitter {
        NeuralSplitter::with_scorer(Box::new(MockScorer), granularity, 0.25, 0.5)
    }

    #[test]
    fn test_sentence_mode() {
        let splitter = mock(Granularity::Sentence);
        let chunks = splitter
            .chunk("First sentence. Second one!\nA title\n\nNew paragraph here.")
            .unwrap();
        assert_eq!(
            chunks,
            vec!["First sentence.", "Second one!", "A title", "New paragraph here."]
        );
        assert_eq!(splitter.granularity(), Granularity::Sentence);
    }

    #[test]
    fn test_paragraph_mode() {
        let splitter = mock(Granularity::Paragraph);
        let chunks = splitter
            .chunk("First sentence. Second one!\nStill here.\n\nNew paragraph here.")
            .unwrap();
        assert_eq!(
            chunks,
            vec!["First sentence. Second one!\nStill here.", "New paragraph here."]
        );
        assert_eq!(splitter.active_threshold(), 0.5);
    }

    #[test]
    fn test_threshold_controls_cuts() {
        // Above the mock's punctuation score nothing but newlines split
        let splitter = NeuralSplitter::with_scorer(Box::new(MockScorer), Granularity::Sentence, 0.45, 0.5);
        let chunks = splitter.chunk("One. Two. Three.").unwrap();
        assert_eq!(chunks, vec!["One. Two. Three."]);
    }

    #[test]
    fn test_empty_input_skips_scoring() {
        let splitter = NeuralSplitter::with_scorer(Box::new(NanScorer), Granularity::Sentence, 0.25, 0.5);
        assert!(splitter.chunk("   ").unwrap().is_empty());
    }

    #[test]
    fn test_nan_probabilities_rejected() {
        let splitter = NeuralSplitter::with_scorer(Box::new(NanScorer), Granularity::Sentence, 0.25, 0.5);
        let err = splitter.chunk("text").unwrap_err();
        assert_eq!(err.error_code(), "MODEL_ERROR");
    }

    #[test]
    fn test_invalid_model_fails_before_loading() {
        let config = ModelConfig {
            name: Some("wtp-bert-huge".to_string()),
            ..ModelConfig::default()
        };
        let err = NeuralSplitter::wtp(&config, Granularity::Sentence).err().unwrap();
        assert_eq!(err.error_code(), "INVALID_MODEL");
    }

    #[test]
    fn test_model_name() {
        assert_eq!(mock(Granularity::Sentence).model_name(), "mock");
    }
}
