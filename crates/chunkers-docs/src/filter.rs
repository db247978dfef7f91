//! Paragraph filtering shared by the document readers.

use std::collections::HashSet;

use chunkers_core::FilterConfig;

/// Drops boilerplate blocks: anything containing a bad word, and anything
/// with too few significant words.
#[derive(Debug, Clone)]
pub struct ParagraphFilter {
    min_words: usize,
    bad_words: Vec<String>,
    stop_words: HashSet<String>,
}

impl ParagraphFilter {
    /// Create a filter. Words are matched case-insensitively.
    pub fn new<B, S>(min_words: usize, bad_words: B, stop_words: S) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            min_words,
            bad_words: bad_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            stop_words: stop_words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Build from configuration, using the reader's defaults for lists the
    /// configuration leaves unset.
    pub fn from_config(config: &FilterConfig, default_bad: &[&str], default_stop: &[&str]) -> Self {
        let bad: Vec<String> = match &config.bad_words {
            Some(words) => words.clone(),
            None => default_bad.iter().map(|w| w.to_string()).collect(),
        };
        let stop: Vec<String> = match &config.stop_words {
            Some(words) => words.clone(),
            None => default_stop.iter().map(|w| w.to_string()).collect(),
        };
        Self::new(config.min_words, bad, stop)
    }

    /// Minimum number of significant words.
    pub fn min_words(&self) -> usize {
        self.min_words
    }

    /// Check if the text contains any bad word (substring match).
    pub fn has_bad_word(&self, text: &str) -> bool {
        if self.bad_words.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        self.bad_words.iter().any(|w| lower.contains(w.as_str()))
    }

    /// Count words that are not stop words and are longer than `min_len`
    /// characters.
    pub fn significant_words(&self, text: &str, min_len: usize) -> usize {
        text.split_whitespace()
            .filter(|w| w.chars().count() > min_len)
            .filter(|w| !self.stop_words.contains(&w.to_lowercase()))
            .count()
    }

    /// Block rule used for extracted document text: no bad words and at
    /// least `min_words` words longer than three characters.
    pub fn keep_block(&self, block: &str) -> bool {
        !self.has_bad_word(block) && self.significant_words(block, 3) >= self.min_words
    }
}

impl Default for ParagraphFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default(), &[], &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_words() {
        let filter = ParagraphFilter::new(1, ["Cookie"], Vec::<String>::new());
        assert!(filter.has_bad_word("We use COOKIES here"));
        assert!(!filter.has_bad_word("Nothing to see"));
    }

    #[test]
    fn test_significant_words() {
        let filter = ParagraphFilter::new(1, Vec::<String>::new(), ["the", "and"]);
        assert_eq!(filter.significant_words("The cat and the dog", 0), 2);
        // Words of three characters or fewer are ignored with min_len 3
        assert_eq!(filter.significant_words("The quick brown fox", 3), 2);
    }

    #[test]
    fn test_keep_block() {
        let filter = ParagraphFilter::default();
        assert!(filter.keep_block("These paragraphs contain several longer words overall"));
        assert!(!filter.keep_block("Too short to keep"));
        assert!(!filter.keep_block("Page 3 of 12"));
    }

    #[test]
    fn test_from_config_overrides_defaults() {
        let config = FilterConfig {
            min_words: 2,
            bad_words: Some(vec!["spam".to_string()]),
            stop_words: None,
        };
        let filter = ParagraphFilter::from_config(&config, &["cookie"], &["the"]);
        assert_eq!(filter.min_words(), 2);
        assert!(filter.has_bad_word("spam spam"));
        assert!(!filter.has_bad_word("cookie banner"));
        assert_eq!(filter.significant_words("the word", 0), 1);
    }
}
