//! Boundary scoring interface and sliding-window helpers.

use std::ops::Range;

use chunkers_core::Result;

/// Produces a boundary probability for every character of a text.
pub trait BoundaryScorer: Send + Sync {
    /// One probability per character (not byte) of `text`.
    fn char_probabilities(&self, text: &str) -> Result<Vec<f32>>;

    /// Name of the underlying model, for logging.
    fn model_name(&self) -> &str;
}

/// A mock scorer for testing that doesn't require actual models.
///
/// Terminal punctuation followed by whitespace or the end of the text
/// scores 0.4, a newline that starts a blank line 0.9, any other newline
/// 0.3, everything else 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockScorer;

impl BoundaryScorer for MockScorer {
    fn char_probabilities(&self, text: &str) -> Result<Vec<f32>> {
        let chars: Vec<char> = text.chars().collect();
        Ok(chars
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let next = chars.get(i + 1).copied();
                match c {
                    '\n' if next == Some('\n') => 0.9,
                    '\n' => 0.3,
                    '.' | '!' | '?' if next.map_or(true, char::is_whitespace) => 0.4,
                    _ => 0.0,
                }
            })
            .collect())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Window ranges covering `0..len`, each at most `block` long, starting
/// `block - stride` apart. The last window is aligned to the end.
pub(crate) fn windows(len: usize, block: usize, stride: usize) -> Vec<Range<usize>> {
    if len <= block {
        return vec![0..len];
    }

    let step = block.saturating_sub(stride).max(1);
    let mut ranges = Vec::new();
    let mut start = 0;
    while start + block < len {
        ranges.push(start..start + block);
        start += step;
    }
    ranges.push(len - block..len);
    ranges
}

/// Run `score` on every window and average the logits where windows overlap.
pub(crate) fn average_windows<F>(len: usize, block: usize, stride: usize, mut score: F) -> Result<Vec<f32>>
where
    F: FnMut(Range<usize>) -> Result<Vec<f32>>,
{
    let mut sums = vec![0.0f32; len];
    let mut counts = vec![0u32; len];

    for range in windows(len, block, stride) {
        let start = range.start;
        let logits = score(range.clone())?;
        for (offset, logit) in logits.into_iter().take(range.len()).enumerate() {
            sums[start + offset] += logit;
            counts[start + offset] += 1;
        }
    }

    Ok(sums
        .into_iter()
        .zip(counts)
        .map(|(sum, count)| if count == 0 { f32::NEG_INFINITY } else { sum / count as f32 })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_scorer() {
        let probs = MockScorer.char_probabilities("Hi. Yo\n\nEnd").unwrap();
        assert_eq!(probs.len(), 11);
        assert_eq!(probs[2], 0.4);
        assert_eq!(probs[6], 0.9);
        assert_eq!(probs[7], 0.3);
        assert_eq!(probs[10], 0.0);
    }

    #[test]
    fn test_mock_scorer_text_end() {
        let probs = MockScorer.char_probabilities("Done.").unwrap();
        assert_eq!(probs[4], 0.4);
    }

    #[test]
    fn test_mock_scorer_ignores_decimal_point() {
        let probs = MockScorer.char_probabilities("3.5").unwrap();
        assert_eq!(probs, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_windows_short_text() {
        assert_eq!(windows(10, 16, 4), vec![0..10]);
        assert_eq!(windows(0, 16, 4), vec![0..0]);
    }

    #[test]
    fn test_windows_cover_everything() {
        let ranges = windows(40, 16, 4);
        assert_eq!(ranges[0], 0..16);
        assert_eq!(ranges[1], 12..28);
        assert_eq!(ranges.last().unwrap(), &(24..40));
        for i in 0..40 {
            assert!(ranges.iter().any(|r| r.contains(&i)), "position {} uncovered", i);
        }
    }

    #[test]
    fn test_average_windows() {
        // Each window reports its own start as the logit for every position
        let averaged = average_windows(40, 16, 4, |range| Ok(vec![range.start as f32; range.len()])).unwrap();

        assert_eq!(averaged.len(), 40);
        assert_eq!(averaged[0], 0.0);
        // Position 13 is covered by the windows starting at 0 and 12
        assert_eq!(averaged[13], 6.0);
        assert_eq!(averaged[39], 24.0);
    }

    #[test]
    fn test_average_windows_propagates_errors() {
        let result = average_windows(10, 4, 1, |_| Err(chunkers_core::ChunkError::model("boom")));
        assert!(result.is_err());
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.99);
        assert_eq!(sigmoid(f32::NEG_INFINITY), 0.0);
    }
}
