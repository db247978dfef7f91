//! Core traits defining the interface between splitters and callers.

use crate::error::Result;
use crate::types::Granularity;

/// A splitter that turns an input into a sequence of text chunks.
///
/// The input is whatever the implementation documents: plain text for the
/// text splitters, and raw content, a file path or a URL for the document
/// readers. Returned chunks are trimmed and never empty.
pub trait Chunker: Send + Sync {
    /// Chunk the input into pieces.
    fn chunk(&self, input: &str) -> Result<Vec<String>>;

    /// Get the size of the pieces this chunker produces.
    fn granularity(&self) -> Granularity;
}

impl<C: Chunker + ?Sized> Chunker for Box<C> {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        (**self).chunk(input)
    }

    fn granularity(&self) -> Granularity {
        (**self).granularity()
    }
}

/// Trim every piece and drop the ones left empty.
pub fn clean_chunks<I, S>(pieces: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pieces
        .into_iter()
        .filter_map(|p| {
            let trimmed = p.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lines;

    impl Chunker for Lines {
        fn chunk(&self, input: &str) -> Result<Vec<String>> {
            Ok(clean_chunks(input.lines()))
        }

        fn granularity(&self) -> Granularity {
            Granularity::Paragraph
        }
    }

    #[test]
    fn test_clean_chunks() {
        let chunks = clean_chunks(["  a  ", "", "   ", "b"]);
        assert_eq!(chunks, vec!["a", "b"]);
    }

    #[test]
    fn test_boxed_chunker() {
        let chunker: Box<dyn Chunker> = Box::new(Lines);
        let chunks = chunker.chunk("one\n\n two ").unwrap();
        assert_eq!(chunks, vec!["one", "two"]);
        assert_eq!(chunker.granularity(), Granularity::Paragraph);
    }
}
