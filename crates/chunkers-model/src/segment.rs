//! Turning boundary probabilities into text segments.

use chunkers_core::{clean_chunks, ChunkError, Result};

/// Breaks taken from the input regardless of the model's opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedBreaks {
    /// Every newline ends a segment (sentence mode).
    Newline,
    /// Only blank lines end a segment (paragraph mode).
    BlankLine,
}

/// Cut `text` after every character whose probability exceeds `threshold`,
/// plus the forced breaks. Segments are trimmed and empty ones dropped.
pub fn split_at_probabilities(
    text: &str,
    probs: &[f32],
    threshold: f32,
    forced: ForcedBreaks,
) -> Result<Vec<String>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    if probs.len() != chars.len() {
        return Err(ChunkError::internal(format!(
            "got {} probabilities for {} characters",
            probs.len(),
            chars.len()
        )));
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut newline_run = 0usize;

    for (i, &(pos, c)) in chars.iter().enumerate() {
        match c {
            '\n' => newline_run += 1,
            ' ' | '\t' | '\r' => {}
            _ => newline_run = 0,
        }

        let is_forced = match forced {
            ForcedBreaks::Newline => c == '\n',
            ForcedBreaks::BlankLine => c == '\n' && newline_run >= 2,
        };

        if probs[i] > threshold || is_forced {
            let end = pos + c.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    Ok(clean_chunks(pieces))
}
