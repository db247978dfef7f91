//! Splitter names and construction.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use chunkers_core::{ChunkError, Chunker, ChunkersConfig, DocumentFormat, Granularity, Result};
use chunkers_docs::{
    DocExtractor, DocumentSplitter, DocxExtractor, HtmlSplitter, MarkdownSplitter, PdfExtractor,
};
use chunkers_model::{ModelFamily, NeuralSplitter};
use chunkers_text::{RegexParagraphSplitter, RegexSentenceSplitter, RuleSentenceSplitter};

/// Every available chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitterKind {
    SatSentence,
    SatParagraph,
    WtpSentence,
    WtpParagraph,
    RegexSentence,
    RegexParagraph,
    RulesSentence,
    MarkdownSentence,
    MarkdownParagraph,
    HtmlSentence,
    HtmlParagraph,
    PdfSentence,
    PdfParagraph,
    DocxSentence,
    DocxParagraph,
    DocSentence,
    DocParagraph,
}

impl SplitterKind {
    /// All kinds, in display order.
    pub fn all() -> &'static [SplitterKind] {
        use SplitterKind::*;
        &[
            SatSentence,
            SatParagraph,
            WtpSentence,
            WtpParagraph,
            RegexSentence,
            RegexParagraph,
            RulesSentence,
            MarkdownSentence,
            MarkdownParagraph,
            HtmlSentence,
            HtmlParagraph,
            PdfSentence,
            PdfParagraph,
            DocxSentence,
            DocxParagraph,
            DocSentence,
            DocParagraph,
        ]
    }

    /// Kebab-case name.
    pub fn name(&self) -> &'static str {
        match self {
            SplitterKind::SatSentence => "sat-sentence",
            SplitterKind::SatParagraph => "sat-paragraph",
            SplitterKind::WtpSentence => "wtp-sentence",
            SplitterKind::WtpParagraph => "wtp-paragraph",
            SplitterKind::RegexSentence => "regex-sentence",
            SplitterKind::RegexParagraph => "regex-paragraph",
            SplitterKind::RulesSentence => "rules-sentence",
            SplitterKind::MarkdownSentence => "markdown-sentence",
            SplitterKind::MarkdownParagraph => "markdown-paragraph",
            SplitterKind::HtmlSentence => "html-sentence",
            SplitterKind::HtmlParagraph => "html-paragraph",
            SplitterKind::PdfSentence => "pdf-sentence",
            SplitterKind::PdfParagraph => "pdf-paragraph",
            SplitterKind::DocxSentence => "docx-sentence",
            SplitterKind::DocxParagraph => "docx-paragraph",
            SplitterKind::DocSentence => "doc-sentence",
            SplitterKind::DocParagraph => "doc-paragraph",
        }
    }

    /// Unit of the chunks this kind produces.
    pub fn granularity(&self) -> Granularity {
        match self {
            SplitterKind::SatSentence
            | SplitterKind::WtpSentence
            | SplitterKind::RegexSentence
            | SplitterKind::RulesSentence
            | SplitterKind::MarkdownSentence
            | SplitterKind::HtmlSentence
            | SplitterKind::PdfSentence
            | SplitterKind::DocxSentence
            | SplitterKind::DocSentence => Granularity::Sentence,
            _ => Granularity::Paragraph,
        }
    }

    /// Segmentation model family, for the neural kinds.
    pub fn model_family(&self) -> Option<ModelFamily> {
        match self {
            SplitterKind::SatSentence | SplitterKind::SatParagraph => Some(ModelFamily::Sat),
            SplitterKind::WtpSentence | SplitterKind::WtpParagraph => Some(ModelFamily::Wtp),
            _ => None,
        }
    }

    /// Whether building this kind loads a segmentation model.
    pub fn needs_model(&self) -> bool {
        self.model_family().is_some()
    }

    /// Pick a document reader from a file name or URL path.
    ///
    /// Plain text, and anything without a known extension, goes to the regex
    /// splitters.
    pub fn for_path(path: &str, granularity: Granularity) -> Self {
        let sentence = granularity == Granularity::Sentence;
        let pick = |s: SplitterKind, p: SplitterKind| if sentence { s } else { p };
        match DocumentFormat::from_path(path) {
            DocumentFormat::Markdown => pick(SplitterKind::MarkdownSentence, SplitterKind::MarkdownParagraph),
            DocumentFormat::Html => pick(SplitterKind::HtmlSentence, SplitterKind::HtmlParagraph),
            DocumentFormat::Pdf => pick(SplitterKind::PdfSentence, SplitterKind::PdfParagraph),
            DocumentFormat::Docx => pick(SplitterKind::DocxSentence, SplitterKind::DocxParagraph),
            DocumentFormat::Doc => pick(SplitterKind::DocSentence, SplitterKind::DocParagraph),
            DocumentFormat::PlainText => pick(SplitterKind::RegexSentence, SplitterKind::RegexParagraph),
        }
    }
}

impl fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SplitterKind {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase().replace('_', "-");
        if name == "pysbd" {
            return Ok(SplitterKind::RulesSentence);
        }
        SplitterKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ChunkError::invalid_input(format!("Unknown splitter: {}", s)))
    }
}

/// Construct the chunker for `kind`.
///
/// Neural kinds load their model here, which may download it on first use.
pub fn build_chunker(kind: SplitterKind, config: &ChunkersConfig) -> Result<Box<dyn Chunker>> {
    config.validate()?;
    debug!("Building {} chunker", kind);

    let granularity = kind.granularity();
    let chunker: Box<dyn Chunker> = match kind {
        SplitterKind::SatSentence | SplitterKind::SatParagraph => {
            Box::new(NeuralSplitter::sat(&config.model, granularity)?)
        }
        SplitterKind::WtpSentence | SplitterKind::WtpParagraph => {
            Box::new(NeuralSplitter::wtp(&config.model, granularity)?)
        }
        SplitterKind::RegexSentence => Box::new(RegexSentenceSplitter::new()),
        SplitterKind::RegexParagraph => Box::new(RegexParagraphSplitter::new()),
        SplitterKind::RulesSentence => Box::new(RuleSentenceSplitter::new(&config.text.lang)?),
        SplitterKind::MarkdownSentence | SplitterKind::MarkdownParagraph => {
            Box::new(MarkdownSplitter::new(granularity, config))
        }
        SplitterKind::HtmlSentence | SplitterKind::HtmlParagraph => Box::new(HtmlSplitter::new(granularity, config)),
        SplitterKind::PdfSentence | SplitterKind::PdfParagraph => {
            Box::new(DocumentSplitter::new(PdfExtractor, granularity, config))
        }
        SplitterKind::DocxSentence | SplitterKind::DocxParagraph => {
            Box::new(DocumentSplitter::new(DocxExtractor, granularity, config))
        }
        SplitterKind::DocSentence | SplitterKind::DocParagraph => {
            Box::new(DocumentSplitter::new(DocExtractor::new(), granularity, config))
        }
    };
    Ok(chunker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        assert_eq!(SplitterKind::all().len(), 17);
        for kind in SplitterKind::all() {
            assert_eq!(kind.to_string().parse::<SplitterKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("pysbd".parse::<SplitterKind>().unwrap(), SplitterKind::RulesSentence);
        assert_eq!("PDF_Paragraph".parse::<SplitterKind>().unwrap(), SplitterKind::PdfParagraph);

        let err = "nltk-sentence".parse::<SplitterKind>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_granularity() {
        assert_eq!(SplitterKind::SatParagraph.granularity(), Granularity::Paragraph);
        assert_eq!(SplitterKind::DocSentence.granularity(), Granularity::Sentence);
        assert!(SplitterKind::WtpSentence.needs_model());
        assert!(!SplitterKind::HtmlParagraph.needs_model());
    }

    #[test]
    fn test_for_path() {
        assert_eq!(
            SplitterKind::for_path("notes/README.md", Granularity::Paragraph),
            SplitterKind::MarkdownParagraph
        );
        assert_eq!(
            SplitterKind::for_path("https://example.com/paper.PDF?download=1", Granularity::Sentence),
            SplitterKind::PdfSentence
        );
        assert_eq!(
            SplitterKind::for_path("report.docx", Granularity::Sentence),
            SplitterKind::DocxSentence
        );
        assert_eq!(
            SplitterKind::for_path("notes.txt", Granularity::Paragraph),
            SplitterKind::RegexParagraph
        );
    }

    #[test]
    fn test_build_non_model_chunkers() {
        let config = ChunkersConfig::default();
        for kind in SplitterKind::all().iter().filter(|k| !k.needs_model()) {
            let chunker = build_chunker(*kind, &config).unwrap();
            assert_eq!(chunker.granularity(), kind.granularity());
        }
    }

    #[test]
    fn test_rules_unsupported_language() {
        let mut config = ChunkersConfig::default();
        config.text.lang = "xx".to_string();
        let err = build_chunker(SplitterKind::RulesSentence, &config).err().unwrap();
        assert_eq!(err.error_code(), "UNSUPPORTED_LANGUAGE");
    }

    #[test]
    fn test_invalid_model_name() {
        let mut config = ChunkersConfig::default();
        config.model.name = Some("sat-99l".to_string());
        let err = build_chunker(SplitterKind::SatSentence, &config).err().unwrap();
        assert_eq!(err.error_code(), "INVALID_MODEL");
    }

    #[test]
    fn test_chunk_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes\n\nFirst line.\n\nSecond line.").unwrap();
        let path = path.to_str().unwrap();

        let kind = SplitterKind::for_path(path, Granularity::Sentence);
        let chunker = build_chunker(kind, &ChunkersConfig::default()).unwrap();
        assert_eq!(chunker.chunk(path).unwrap(), vec!["First line.", "Second line."]);
    }
}
