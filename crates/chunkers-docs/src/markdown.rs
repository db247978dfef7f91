//! Markdown reader.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use tracing::{debug, info};

use chunkers_core::{clean_chunks, ChunkersConfig, Chunker, DocumentFormat, FetchConfig, Granularity, InputSource, Result};

/// Text under one heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSection {
    /// Heading path, outermost first, joined with `" - "`. Empty for text
    /// before the first heading.
    pub title: String,
    /// Paragraphs and code blocks, one per line.
    pub body: String,
}

#[derive(Default)]
struct SectionBuilder {
    headings: Vec<(HeadingLevel, String)>,
    blocks: Vec<String>,
    sections: Vec<MarkdownSection>,
}

impl SectionBuilder {
    fn title(&self) -> String {
        self.headings
            .iter()
            .map(|(_, text)| text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }

    fn flush(&mut self) {
        let body = self
            .blocks
            .drain(..)
            .map(|block| block.trim().to_string())
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if !body.is_empty() {
            let title = self.title();
            self.sections.push(MarkdownSection { title, body });
        }
    }

    fn open_heading(&mut self, level: HeadingLevel) {
        self.flush();
        while self.headings.last().is_some_and(|(l, _)| *l >= level) {
            self.headings.pop();
        }
        self.headings.push((level, String::new()));
    }
}

/// Parse markdown into titled sections.
///
/// Lists and tables are skipped; paragraphs and code blocks under the same
/// heading become the lines of one section body.
pub fn parse_sections(markdown: &str) -> Vec<MarkdownSection> {
    let mut builder = SectionBuilder::default();
    let mut in_heading = false;
    let mut in_block = false;
    let mut skip_depth = 0usize;
    let mut current = String::new();

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::List(_)) | Event::Start(Tag::Table(_)) => skip_depth += 1,
            Event::End(TagEnd::List(_)) | Event::End(TagEnd::Table) => {
                skip_depth = skip_depth.saturating_sub(1)
            }
            _ if skip_depth > 0 => {}

            Event::Start(Tag::Heading { level, .. }) => {
                builder.open_heading(level);
                in_heading = true;
            }
            Event::End(TagEnd::Heading(_)) => in_heading = false,

            Event::Start(Tag::Paragraph) | Event::Start(Tag::CodeBlock(_)) => {
                in_block = true;
                current.clear();
            }
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::CodeBlock) => {
                in_block = false;
                builder.blocks.push(std::mem::take(&mut current));
            }

            Event::Text(text) | Event::Code(text) => {
                if in_heading {
                    if let Some((_, heading)) = builder.headings.last_mut() {
                        heading.push_str(&text);
                    }
                } else if in_block {
                    current.push_str(&text);
                }
            }
            Event::SoftBreak => {
                if in_heading {
                    if let Some((_, heading)) = builder.headings.last_mut() {
                        heading.push(' ');
                    }
                } else if in_block {
                    current.push(' ');
                }
            }
            Event::HardBreak if in_block => current.push('\n'),
            _ => {}
        }
    }
    builder.flush();
    builder.sections
}

/// Paragraph or sentence splitter for markdown documents.
///
/// Paragraph chunks are `"{title}\n\n{body}"` per section; sentence chunks
/// are the body lines without titles.
pub struct MarkdownSplitter {
    granularity: Granularity,
    fetch: FetchConfig,
}

impl MarkdownSplitter {
    pub fn new(granularity: Granularity, config: &ChunkersConfig) -> Self {
        Self {
            granularity,
            fetch: config.fetch.clone(),
        }
    }
}

impl Chunker for MarkdownSplitter {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        let source = InputSource::detect(input, DocumentFormat::Markdown.extensions());
        info!("Parsing markdown from {}", source.describe());

        let markdown = source.load_text(&self.fetch)?;
        let sections = parse_sections(&markdown);
        debug!("{} markdown sections", sections.len());

        Ok(match self.granularity {
            Granularity::Paragraph => sections
                .into_iter()
                .map(|section| {
                    if section.title.is_empty() {
                        section.body
                    } else {
                        format!("{}\n\n{}", section.title, section.body)
                    }
                })
                .collect(),
            Granularity::Sentence => clean_chunks(sections.iter().flat_map(|s| s.body.split('\n'))),
        })
    }

    fn granularity(&self) -> Granularity {
        self.granularity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
Intro line before any heading.

# Guide

Welcome to the *guide*.
It wraps here.

## Install

Run `cargo install` first.

- a list item
- another item

| a | b |
|---|---|
| 1 | 2 |

## Usage

```
chunkers list
```

# Appendix

Final words.
";

    #[test]
    fn test_parse_sections() {
        let sections = parse_sections(DOC);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["", "Guide", "Guide - Install", "Guide - Usage", "Appendix"]);

        assert_eq!(sections[0].body, "Intro line before any heading.");
        assert_eq!(sections[1].body, "Welcome to the guide. It wraps here.");
        assert_eq!(sections[2].body, "Run cargo install first.");
        assert_eq!(sections[3].body, "chunkers list");
        assert_eq!(sections[4].body, "Final words.");
    }

    #[test]
    fn test_lists_and_tables_skipped() {
        let sections = parse_sections(DOC);
        assert!(sections.iter().all(|s| !s.body.contains("list item")));
        assert!(sections.iter().all(|s| !s.body.contains('|')));
    }

    #[test]
    fn test_empty_heading_sections_skipped() {
        let sections = parse_sections("# Empty\n\n# Full\n\nBody text.");
        assert_eq!(
            sections,
            vec![MarkdownSection {
                title: "Full".to_string(),
                body: "Body text.".to_string(),
            }]
        );
    }

    #[test]
    fn test_multiple_paragraphs_joined() {
        let sections = parse_sections("# Notes\n\nFirst.\n\nSecond.");
        assert_eq!(sections[0].body, "First.\nSecond.");
    }

    #[test]
    fn test_paragraph_chunks() {
        let splitter = MarkdownSplitter::new(Granularity::Paragraph, &ChunkersConfig::default());
        let chunks = splitter.chunk("# Title\n\nSome text.\n\n## Sub\n\nMore text.").unwrap();
        assert_eq!(chunks, vec!["Title\n\nSome text.", "Title - Sub\n\nMore text."]);
    }

    #[test]
    fn test_sentence_chunks() {
        let splitter = MarkdownSplitter::new(Granularity::Sentence, &ChunkersConfig::default());
        let chunks = splitter.chunk("# Title\n\nOne.\n\nTwo.\n\n# Other\n\nThree.").unwrap();
        assert_eq!(chunks, vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn test_markdown_file_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Readme\n\nHello from a file.").unwrap();

        let splitter = MarkdownSplitter::new(Granularity::Paragraph, &ChunkersConfig::default());
        let chunks = splitter.chunk(path.to_str().unwrap()).unwrap();
        assert_eq!(chunks, vec!["Readme\n\nHello from a file."]);
    }
}
