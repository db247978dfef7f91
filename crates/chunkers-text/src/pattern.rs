//! Regex-based splitters.
//!
//! These make no attempt at abbreviation handling; they are the cheap
//! option when a model or rule table is not worth loading.

use std::sync::OnceLock;

use regex::Regex;

use chunkers_core::{clean_chunks, Chunker, Granularity, Result};

/// Terminal punctuation run plus any closing quotes or brackets.
fn terminator() -> &'static Regex {
    static TERMINATOR: OnceLock<Regex> = OnceLock::new();
    TERMINATOR.get_or_init(|| {
        Regex::new(r#"(?:[.!?…]+|[。！？]+)["'”’»」』)\]]*"#).expect("terminator pattern is valid")
    })
}

fn is_fullwidth_terminator(c: char) -> bool {
    matches!(c, '。' | '！' | '？')
}

/// Split text into sentences after terminal punctuation.
///
/// A boundary is placed after a punctuation run when it is followed by
/// whitespace or the end of the text. Full-width terminators need no
/// trailing whitespace. Sentences are trimmed and empty ones dropped.
pub fn sentence_tokenize(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for m in terminator().find_iter(text) {
        let rest = &text[m.end()..];
        let fullwidth = m.as_str().chars().next().map_or(false, is_fullwidth_terminator);
        let at_boundary = match rest.chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || fullwidth,
        };

        if at_boundary {
            pieces.push(&text[start..m.end()]);
            start = m.end();
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    clean_chunks(pieces)
}

/// Paragraph splitter that treats every line as a paragraph.
#[derive(Debug, Clone, Default)]
pub struct RegexParagraphSplitter;

impl RegexParagraphSplitter {
    /// Create a new paragraph splitter.
    pub fn new() -> Self {
        Self
    }
}

impl Chunker for RegexParagraphSplitter {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        Ok(clean_chunks(input.lines()))
    }

    fn granularity(&self) -> Granularity {
        Granularity::Paragraph
    }
}

/// Sentence splitter that tokenizes every line on terminal punctuation.
#[derive(Debug, Clone, Default)]
pub struct RegexSentenceSplitter;

impl RegexSentenceSplitter {
    /// Create a new sentence splitter.
    pub fn new() -> Self {
        Self
    }
}

impl Chunker for RegexSentenceSplitter {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        Ok(input.lines().flat_map(sentence_tokenize).collect())
    }

    fn granularity(&self) -> Granularity {
        Granularity::Sentence
    }
}
