//! Rule-based sentence boundary detection.
//!
//! Candidate boundaries are terminal punctuation runs. A candidate is kept
//! unless one of the language rules suppresses it: abbreviations, initials,
//! ordinals, lowercase continuations, or a bracket or quote pair that
//! encloses it within the same paragraph.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use chunkers_core::{clean_chunks, ChunkError, Chunker, Granularity, Result};

use crate::abbreviations::{AbbreviationKind, LanguageRules};

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…' | '。' | '！' | '？')
}

fn is_fullwidth(c: char) -> bool {
    matches!(c, '。' | '！' | '？')
}

/// Blank line: two newlines with only spaces or tabs between them.
fn blank_line() -> &'static Regex {
    static BLANK_LINE: OnceLock<Regex> = OnceLock::new();
    BLANK_LINE.get_or_init(|| Regex::new(r"\n[^\S\n]*\n").expect("blank line pattern is valid"))
}

/// Sentence splitter driven by per-language abbreviation rules.
#[derive(Debug, Clone)]
pub struct RuleSentenceSplitter {
    rules: LanguageRules,
}

impl RuleSentenceSplitter {
    /// Create a splitter for a language code such as `en` or `de-AT`.
    pub fn new(lang: &str) -> Result<Self> {
        let rules = LanguageRules::for_language(lang).ok_or_else(|| {
            ChunkError::UnsupportedLanguage {
                lang: lang.to_string(),
            }
        })?;
        debug!("Rule splitter ready for '{}'", rules.lang());
        Ok(Self { rules })
    }

    /// Language the splitter was built for.
    pub fn lang(&self) -> &str {
        self.rules.lang()
    }

    /// Byte offsets where sentences end, ascending.
    fn boundaries(&self, text: &str) -> Vec<usize> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |(pos, _)| *pos);
        let spans = enclosure_spans(&chars);

        let mut cuts: Vec<usize> = blank_line().find_iter(text).map(|m| m.start()).collect();
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if !is_terminator(c) {
                i += 1;
                continue;
            }

            let mut j = i;
            while j < chars.len() && is_terminator(chars[j].1) {
                j += 1;
            }
            let run = &text[pos..byte_at(j)];

            // Closing marks directly after the run belong to this sentence
            while j < chars.len() && is_closing_mark(chars[j].1) {
                j += 1;
            }
            let end = byte_at(j);

            let last = j - 1;
            let enclosed = spans.iter().any(|&(open, close)| open < last && last < close);
            if !enclosed && self.is_boundary(text, pos, run, end) {
                cuts.push(end);
            }
            i = j;
        }

        cuts.sort_unstable();
        cuts.dedup();
        cuts
    }

    /// Decide whether the punctuation `run` at byte `pos` ends a sentence.
    /// `end` is the byte offset just past the run and its closing marks.
    fn is_boundary(&self, text: &str, pos: usize, run: &str, end: usize) -> bool {
        let rest = &text[end..];
        let after = rest.trim_start();
        let gap = &rest[..rest.len() - after.len()];

        let next = match after.chars().next() {
            Some(next) => next,
            None => return true,
        };

        if gap.is_empty() && !run.chars().all(is_fullwidth) {
            return false;
        }
        if gap.matches('\n').count() >= 2 {
            return true;
        }
        if next.is_lowercase() {
            return false;
        }
        if run != "." {
            return true;
        }
        if next.is_ascii_digit() || matches!(next, ',' | ';' | ':') {
            return false;
        }

        let word = preceding_word(&text[..pos]);
        if word.is_empty() {
            return true;
        }
        match self.rules.abbreviation(&word) {
            Some(AbbreviationKind::Prepositive) => return false,
            Some(AbbreviationKind::Number) => return next != '(',
            Some(AbbreviationKind::Plain) => return true,
            None => {}
        }
        if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
            return false;
        }
        if self.rules.ordinal_dot() && word.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if is_dotted_acronym(&word) {
            return next.is_uppercase();
        }
        true
    }
}

fn is_closing_mark(c: char) -> bool {
    matches!(c, ')' | ']' | '}' | '"' | '”' | '»' | '\'' | '’')
}

/// Closing character expected for an opening bracket or quote.
fn closer_for(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '“' => Some('”'),
        '«' => Some('»'),
        _ => None,
    }
}

/// Char index pairs of matched brackets and quotes.
///
/// Pairs never cross a blank line, and openers without a closer in the same
/// paragraph (`:(`, a stray quote) produce no span. A straight `"` opens
/// only at the start of the text or after whitespace or another opener.
fn enclosure_spans(chars: &[(usize, char)]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut open: Vec<(usize, char)> = Vec::new();

    for (idx, &(_, c)) in chars.iter().enumerate() {
        if c == '\n' {
            let blank = chars[idx + 1..]
                .iter()
                .map(|&(_, c)| c)
                .find(|c| !matches!(c, ' ' | '\t' | '\r'))
                == Some('\n');
            if blank {
                open.clear();
            }
            continue;
        }

        let opens_quote = c == '"'
            && idx
                .checked_sub(1)
                .map_or(true, |prev| chars[prev].1.is_whitespace() || closer_for(chars[prev].1).is_some());

        if let Some(closer) = closer_for(c) {
            open.push((idx, closer));
        } else if opens_quote {
            open.push((idx, '"'));
        } else if matches!(c, ')' | ']' | '}' | '”' | '»' | '"') {
            if let Some(depth) = open.iter().rposition(|&(_, closer)| closer == c) {
                spans.push((open[depth].0, idx));
                open.truncate(depth);
            }
        }
    }
    spans
}

/// Last whitespace-delimited word, lowercased, without leading punctuation.
fn preceding_word(before: &str) -> String {
    before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// `u.s.a`-style words: single letters separated by dots.
fn is_dotted_acronym(word: &str) -> bool {
    word.contains('.')
        && word
            .split('.')
            .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
}

impl Chunker for RuleSentenceSplitter {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        for cut in self.boundaries(input) {
            if cut > start {
                pieces.push(&input[start..cut]);
                start = cut;
            }
        }
        pieces.push(&input[start..]);

        Ok(clean_chunks(pieces))
    }

    fn granularity(&self) -> Granularity {
        Granularity::Sentence
    }
}
