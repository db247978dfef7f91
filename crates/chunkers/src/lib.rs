//! chunkers - Sentence and paragraph chunking behind one interface
//!
//! Every splitter implements [`Chunker`]: `chunk(input)` returns the
//! sentences or paragraphs of `input`, which may be raw text, a file path or
//! a URL depending on the splitter.
//!
//! # Example
//!
//! ```rust
//! use chunkers::{build_chunker, ChunkersConfig, SplitterKind};
//!
//! let kind: SplitterKind = "rules-sentence".parse().unwrap();
//! let chunker = build_chunker(kind, &ChunkersConfig::default()).unwrap();
//! let sentences = chunker.chunk("Dr. Watson arrived. Holmes was waiting.").unwrap();
//! assert_eq!(sentences, vec!["Dr. Watson arrived.", "Holmes was waiting."]);
//! ```

mod registry;

pub use registry::{build_chunker, SplitterKind};

pub use chunkers_core::{ChunkError, Chunker, ChunkersConfig, DocumentFormat, Granularity, InputSource, Result};
pub use chunkers_docs::{
    DocExtractor, DocumentSplitter, DocxExtractor, HtmlSplitter, MarkdownSplitter, PdfExtractor,
};
pub use chunkers_model::{ModelFamily, NeuralSplitter};
pub use chunkers_text::{RegexParagraphSplitter, RegexSentenceSplitter, RuleSentenceSplitter};
