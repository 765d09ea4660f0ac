//! Markup-stripping text normalizer.
//!
//! `AnalyzedText` is the immutable derived view every layer scorer reads:
//! plain text, word count, sentence list, paragraph list, plus the raw
//! markup-bearing content for the scorers that inspect formatting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Paragraphs shorter than this many words carry no usable signal.
const MIN_PARAGRAPH_WORDS: usize = 5;

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

static HEADING_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s{0,3}#{1,6}\s+").unwrap());

static BLOCKQUOTE_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s{0,3}(?:>\s?)+").unwrap());

static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:[-*+]|\d+[.)])\s+").unwrap());

static HORIZONTAL_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:-{3,}|\*{3,}|_{3,})\s*$").unwrap());

static FENCED_CODE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());

static EMPHASIS_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*{1,3}|`|\b_{1,3}|_{1,3}\b").unwrap());

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedText {
    raw_content: String,
    plain_text: String,
    word_count: usize,
    sentences: Vec<String>,
    paragraphs: Vec<String>,
}

impl AnalyzedText {
    pub fn new(content: &str) -> Self {
        let raw_content = content.to_string();
        let plain_text = strip_markup(content);
        let word_count = plain_text.split_whitespace().count();

        let sentences: Vec<String> = SENTENCE_SPLIT_RE
            .split(&plain_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let paragraphs: Vec<String> = BLANK_LINE_RE
            .split(&plain_text)
            .map(|p| p.trim().to_string())
            .filter(|p| p.split_whitespace().count() >= MIN_PARAGRAPH_WORDS)
            .collect();

        Self {
            raw_content,
            plain_text,
            word_count,
            sentences,
            paragraphs,
        }
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }
}

/// Reduce markdown-like markup to plain prose. Link text survives, URLs and
/// images do not. Fenced code blocks are dropped wholesale but leave a
/// paragraph break behind so surrounding prose stays separated.
fn strip_markup(content: &str) -> String {
    let text = FENCED_CODE_BLOCK_RE.replace_all(content, "\n\n");
    let text = IMAGE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HORIZONTAL_RULE_RE.replace_all(&text, "");
    let text = HEADING_MARKER_RE.replace_all(&text, "");
    let text = BLOCKQUOTE_MARKER_RE.replace_all(&text, "");
    let text = LIST_MARKER_RE.replace_all(&text, "");
    let text = EMPHASIS_MARKER_RE.replace_all(&text, "");
    text.trim().to_string()
}
