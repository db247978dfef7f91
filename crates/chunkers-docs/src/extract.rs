//! Shared pipeline for binary documents (PDF, DOCX, DOC).

use tracing::{debug, info};

use chunkers_core::{
    clean_chunks, ChunkersConfig, Chunker, DocumentFormat, FetchConfig, Granularity, InputSource, Result,
};

use crate::filter::ParagraphFilter;

/// Extracts plain text from one binary document format.
pub trait TextExtractor: Send + Sync {
    /// Format handled by this extractor.
    fn format(&self) -> DocumentFormat;

    /// Extract text. Paragraphs are separated by blank lines.
    fn extract(&self, source: &InputSource, fetch: &FetchConfig) -> Result<String>;
}

/// Paragraph or sentence splitter over an extractor.
///
/// Paragraphs are the blank-line separated blocks that pass the filter;
/// sentences are the lines of those paragraphs with more than three words.
pub struct DocumentSplitter<E> {
    extractor: E,
    granularity: Granularity,
    filter: ParagraphFilter,
    fetch: FetchConfig,
}

impl<E: TextExtractor> DocumentSplitter<E> {
    /// Create a splitter with filtering and fetching from the configuration.
    pub fn new(extractor: E, granularity: Granularity, config: &ChunkersConfig) -> Self {
        Self {
            extractor,
            granularity,
            filter: ParagraphFilter::from_config(&config.filter, &[], &[]),
            fetch: config.fetch.clone(),
        }
    }

    /// Replace the paragraph filter.
    pub fn with_filter(mut self, filter: ParagraphFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Filtered paragraphs of already extracted text.
    pub fn paragraphs(&self, text: &str) -> Vec<String> {
        clean_chunks(text.split("\n\n").filter(|block| self.filter.keep_block(block)))
    }
}

/// Lines with more than three words.
pub(crate) fn sentence_lines(paragraphs: &[String]) -> Vec<String> {
    clean_chunks(
        paragraphs
            .iter()
            .flat_map(|p| p.split('\n'))
            .filter(|line| line.split_whitespace().count() > 3),
    )
}

impl<E: TextExtractor> Chunker for DocumentSplitter<E> {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        let format = self.extractor.format();
        let source = InputSource::detect(input, format.extensions());
        info!("Extracting {} text from {}", format, source.describe());

        let text = self.extractor.extract(&source, &self.fetch)?;
        let paragraphs = self.paragraphs(&text);
        debug!("{} paragraphs kept from {} bytes of text", paragraphs.len(), text.len());

        Ok(match self.granularity {
            Granularity::Paragraph => paragraphs,
            Granularity::Sentence => sentence_lines(&paragraphs),
        })
    }

    fn granularity(&self) -> Granularity {
        self.granularity
    }
}
