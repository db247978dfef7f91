//! Web page reader.
//!
//! Pages are denoised with regular expressions rather than a DOM: scripts
//! and styles go, structural tags turn into line breaks, and lines that look
//! like navigation or cookie banners are filtered out.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::{debug, info};

use chunkers_core::{ChunkersConfig, Chunker, DocumentFormat, FetchConfig, Granularity, InputSource, Result};
use chunkers_text::sentence_tokenize;

use crate::filter::ParagraphFilter;

/// Lines containing these are dropped by default.
pub const HTML_BAD_WORDS: &[&str] = &["cookie"];

/// Words that do not count towards a line's length by default.
pub const HTML_STOP_WORDS: &[&str] = &["the", "a", "an", "to", "of", "for", "as", "and", "it", "in", "we", "i"];

struct Patterns {
    script: Regex,
    style: Regex,
    any_tag: Regex,
    kept_tag: Regex,
    tag_attributes: Regex,
    div: Regex,
    br: Regex,
    headings: Vec<Regex>,
    paragraph: Regex,
    leftover_tag: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |pattern: &str| Regex::new(pattern).expect("html pattern is valid");
        Patterns {
            script: re(r"(?is)<script[^>]*>.*?</script>"),
            style: re(r"(?is)<style[^>]*>.*?</style>"),
            any_tag: re(r"(?s)</?[^>]*>"),
            kept_tag: re(r"(?i)^</?(div|h[1-6]|p|br)\b"),
            tag_attributes: re(r"<(/?\w+)([^>]*)>"),
            div: re(r"(?i)</?div>"),
            br: re(r"(?i)<br\s*/?>"),
            headings: (1..=6)
                .map(|n| re(&format!(r"(?is)<h{n}>(.*?)</h{n}>")))
                .collect(),
            paragraph: re(r"(?is)<p>(.*?)</p>"),
            leftover_tag: re(r"</?\w+>"),
        }
    })
}

/// Decode the handful of entities that show up in body text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Reduce an HTML page to its text paragraphs.
///
/// Lines containing a bad word are removed and lines with fewer than
/// `min_words` non-stop words are blanked, so runs of navigation links and
/// footers collapse into paragraph breaks.
pub fn denoise_html(html: &str, filter: &ParagraphFilter) -> Vec<String> {
    let p = patterns();

    let html = p.script.replace_all(html, "");
    let html = p.style.replace_all(&html, "");

    // Keep only structural tags, without their attributes
    let html = p.any_tag.replace_all(&html, |caps: &Captures| {
        let tag = &caps[0];
        if p.kept_tag.is_match(tag) {
            tag.to_string()
        } else {
            String::new()
        }
    });
    let html = p.tag_attributes.replace_all(&html, "<$1>");

    let html = p.div.replace_all(&html, "\n");
    let mut html = p.br.replace_all(&html, "\n").into_owned();
    for heading in &p.headings {
        html = heading.replace_all(&html, "\n\n${1}").into_owned();
    }
    let html = p.paragraph.replace_all(&html, "\n\n${1}");
    let html = p.leftover_tag.replace_all(&html, "");
    let text = decode_entities(&html);

    let mut lines: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if filter.has_bad_word(line) {
            continue;
        }
        if filter.significant_words(line, 0) < filter.min_words() {
            lines.push("\n");
        } else {
            lines.push(line);
        }
    }

    lines
        .join("\n")
        .split("\n\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

/// Paragraph or sentence splitter for web pages.
pub struct HtmlSplitter {
    granularity: Granularity,
    filter: ParagraphFilter,
    fetch: FetchConfig,
}

impl HtmlSplitter {
    /// Create a splitter; unset filter lists use the HTML defaults.
    pub fn new(granularity: Granularity, config: &ChunkersConfig) -> Self {
        Self {
            granularity,
            filter: ParagraphFilter::from_config(&config.filter, HTML_BAD_WORDS, HTML_STOP_WORDS),
            fetch: config.fetch.clone(),
        }
    }
}

impl Chunker for HtmlSplitter {
    fn chunk(&self, input: &str) -> Result<Vec<String>> {
        let source = InputSource::detect(input, DocumentFormat::Html.extensions());
        info!("Denoising HTML from {}", source.describe());

        let html = source.load_text(&self.fetch)?;
        let paragraphs = denoise_html(&html, &self.filter);
        debug!("{} paragraphs after denoising", paragraphs.len());

        Ok(match self.granularity {
            Granularity::Paragraph => paragraphs,
            Granularity::Sentence => paragraphs
                .iter()
                .flat_map(|p| p.split('\n'))
                .flat_map(sentence_tokenize)
                .filter(|s| s.split_whitespace().count() > 4)
                .collect(),
        })
    }

    fn granularity(&self) -> Granularity {
        self.granularity
    }
}
