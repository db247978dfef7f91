//! DOCX text extraction.

use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

use chunkers_core::{ChunkError, DocumentFormat, FetchConfig, InputSource, Result};

use crate::extract::TextExtractor;

/// Extracts the body paragraphs of a DOCX document with docx-rs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Extract text from DOCX bytes, one paragraph per blank-line block.
    pub fn extract_bytes(bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| ChunkError::extraction(DocumentFormat::Docx, e))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

/// Runs nest inside hyperlinks and tracked insertions; deletions are skipped.
fn push_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
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
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Insert};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_extract_paragraphs() {
        let bytes = build_docx(&["First paragraph.", "Second paragraph."]);
        let text = DocxExtractor::extract_bytes(&bytes).unwrap();
        assert_eq!(text, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_hyperlink_and_insert_text() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("Read the "))
            .add_hyperlink(
                Hyperlink::new("https://example.com/guide", HyperlinkType::External)
                    .add_run(Run::new().add_text("installation guide")),
            )
            .add_run(Run::new().add_text(" before starting."))
            .add_insert(Insert::new(Run::new().add_text(" It is short.")));
        let mut buf = Cursor::new(Vec::new());
        Docx::new().add_paragraph(paragraph).build().pack(&mut buf).unwrap();

        let text = DocxExtractor::extract_bytes(&buf.into_inner()).unwrap();
        assert_eq!(text, "Read the installation guide before starting. It is short.");
    }

    #[test]
    fn test_chunk_docx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        std::fs::write(
            &path,
            build_docx(&[
                "Title",
                "The quarterly report describes substantial revenue growth across regions.",
                "Appendix",
            ]),
        )
        .unwrap();

        let splitter = DocumentSplitter::new(DocxExtractor, Granularity::Paragraph, &ChunkersConfig::default());
        let chunks = splitter.chunk(path.to_str().unwrap()).unwrap();
        assert_eq!(
            chunks,
            vec!["The quarterly report describes substantial revenue growth across regions."]
        );
    }

    #[test]
    fn test_invalid_docx() {
        let err = DocxExtractor::extract_bytes(b"not a zip archive").unwrap_err();
        assert_eq!(err.error_code(), "EXTRACTION_FAILED");
    }
}
