//! Core domain types.

use serde::{Deserialize, Serialize};

/// Size of the pieces a chunker produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Sentence,
    Paragraph,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sentence => "sentence",
            Self::Paragraph => "paragraph",
        };
        write!(f, "{}", s)
    }
}

/// Document format, determines which reader extracts the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    PlainText,
    Markdown,
    Html,
    Pdf,
    Docx,
    Doc,
}

impl DocumentFormat {
    /// Detect document format from file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Self::Markdown,
            "html" | "htm" | "xhtml" => Self::Html,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::Doc,
            _ => Self::PlainText,
        }
    }

    /// Detect document format from a path or URL.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        match file_name.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Self::PlainText,
        }
    }

    /// File extensions this format is read from.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::PlainText => &["txt"],
            Self::Markdown => &["md", "markdown"],
            Self::Html => &["html", "htm", "xhtml"],
            Self::Pdf => &["pdf"],
            Self::Docx => &["docx"],
            Self::Doc => &["doc"],
        }
    }

    /// Check if the format has to be read as bytes rather than text.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Pdf | Self::Docx | Self::Doc)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PlainText => "Plain Text",
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Doc => "DOC",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("MD"), DocumentFormat::Markdown);
        assert_eq!(DocumentFormat::from_extension("htm"), DocumentFormat::Html);
        assert_eq!(DocumentFormat::from_extension("docx"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_extension("doc"), DocumentFormat::Doc);
        assert_eq!(DocumentFormat::from_extension("rs"), DocumentFormat::PlainText);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path("/tmp/report.pdf"), DocumentFormat::Pdf);
        assert_eq!(
            DocumentFormat::from_path("https://example.com/README.md?raw=true"),
            DocumentFormat::Markdown
        );
        assert_eq!(
            DocumentFormat::from_path("https://example.com/page"),
            DocumentFormat::PlainText
        );
        assert_eq!(DocumentFormat::from_path("notes"), DocumentFormat::PlainText);
    }

    #[test]
    fn test_binary_formats() {
        assert!(DocumentFormat::Pdf.is_binary());
        assert!(DocumentFormat::Doc.is_binary());
        assert!(!DocumentFormat::Html.is_binary());
    }

    #[test]
    fn test_display() {
        assert_eq!(DocumentFormat::Docx.to_string(), "DOCX");
        assert_eq!(Granularity::Sentence.to_string(), "sentence");
    }
}
