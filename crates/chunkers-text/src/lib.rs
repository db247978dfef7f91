//! chunkers-text - Rule-based text splitters
//!
//! # Splitters
//!
//! - [`RegexSentenceSplitter`] / [`RegexParagraphSplitter`]: fast splitting on
//!   line breaks and terminal punctuation.
//!
//! - [`RuleSentenceSplitter`]: language-aware sentence boundary detection
//!   with abbreviation, initials, ellipsis and enclosure rules.
//!
//! # Example
//!
//! ```rust
//! use chunkers_text::{Chunker, RuleSentenceSplitter};
//!
//! let splitter = RuleSentenceSplitter::new("en").unwrap();
//! let sentences = splitter.chunk("Mr. Smith left. He was late.").unwrap();
//! assert_eq!(sentences, vec!["Mr. Smith left.", "He was late."]);
//! ```

mod abbreviations;
mod pattern;
mod rules;

pub use abbreviations::{AbbreviationKind, LanguageRules, SUPPORTED_LANGUAGES};
pub use pattern::{sentence_tokenize, RegexParagraphSplitter, RegexSentenceSplitter};
pub use rules::RuleSentenceSplitter;

// Re-export types for convenience
pub use chunkers_core::{Chunker, Granularity};
