//! PDF text extraction.

use tracing::warn;

use chunkers_core::{ChunkError, DocumentFormat, FetchConfig, InputSource, Result};

use crate::extract::TextExtractor;

/// Extracts PDF text with pdf-extract.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text from PDF bytes. Form feeds between pages become blank lines.
    pub fn extract_bytes(bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ChunkError::extraction(DocumentFormat::Pdf, e))?;

        if text.trim().is_empty() {
            warn!("PDF contains no extractable text (scanned or image-only?)");
        }
        Ok(text.replace('\x0C', "\n\n"))
    }
}

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, source: &InputSource, fetch: &FetchConfig) -> Result<String> {
        let bytes = source.load_bytes(fetch)?;
        Self::extract_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DocumentSplitter;
    use chunkers_core::{ChunkersConfig, Chunker, Granularity};

    #[test]
    fn test_garbage_bytes() {
        let err = PdfExtractor::extract_bytes(b"definitely not a pdf").unwrap_err();
        assert_eq!(err.error_code(), "EXTRACTION_FAILED");
        assert!(err.to_string().contains("PDF"));
    }

    #[test]
    fn test_raw_text_rejected() {
        let splitter = DocumentSplitter::new(PdfExtractor, Granularity::Paragraph, &ChunkersConfig::default());
        let err = splitter.chunk("just some text, not a document").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4\ngarbage").unwrap();

        let splitter = DocumentSplitter::new(PdfExtractor, Granularity::Sentence, &ChunkersConfig::default());
        let err = splitter.chunk(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "EXTRACTION_FAILED");
    }
}
