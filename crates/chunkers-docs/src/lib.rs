//! chunkers-docs - Document format readers
//!
//! Each reader accepts raw content, a file path or a URL, extracts plain
//! text, and chunks it into paragraphs or sentences.
//!
//! # Readers
//!
//! - [`MarkdownSplitter`]: heading-titled sections (pulldown-cmark).
//! - [`HtmlSplitter`]: denoised web page paragraphs.
//! - [`DocumentSplitter`] with [`PdfExtractor`], [`DocxExtractor`] or
//!   [`DocExtractor`]: text extracted from binary documents.

mod doc;
mod docx;
mod extract;
mod filter;
mod html;
mod markdown;
mod pdf;

pub use doc::DocExtractor;
pub use docx::DocxExtractor;
pub use extract::{DocumentSplitter, TextExtractor};
pub use filter::ParagraphFilter;
pub use html::{denoise_html, HtmlSplitter, HTML_BAD_WORDS, HTML_STOP_WORDS};
pub use markdown::{parse_sections, MarkdownSection, MarkdownSplitter};
pub use pdf::PdfExtractor;

// Re-export types for convenience
pub use chunkers_core::{Chunker, DocumentFormat, Granularity};
