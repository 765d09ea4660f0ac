//! Improvement dispatcher: maps an improvement tag to a rewrite action.
//!
//! One action (`clean_artifacts`) is a deterministic local transform. The
//! rest build an editing instruction and delegate to the injected
//! [`TextGenerator`]; three of those splice the generated fragment back into
//! the article at a heuristically chosen position.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::generator::{GenerateError, TextGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECS};
use crate::patterns::{
    AI_SELF_REF_SENTENCE_RE, CITATION_ARTIFACT_RE, CLOSING_SECTION_RE, H2_LINE_RE,
    TRACKING_PARAM_RE,
};
use crate::prompts;

/// Words from the top of the article handed to the generator for intro work.
const INTRO_SPAN_WORDS: usize = 150;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which article attribute the caller should persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementField {
    Title,
    MetaDescription,
    Content,
}

/// The article fields an improvement can read. Borrowed; the dispatcher
/// never mutates caller state.
#[derive(Debug, Clone, Copy)]
pub struct Article<'a> {
    pub content: &'a str,
    pub title: &'a str,
    pub meta_description: &'a str,
    pub keyword: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementResult {
    pub field: ImprovementField,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementType {
    CleanArtifacts,
    HumanizeVocabulary,
    VarySentenceLength,
    RemovePuffery,
    AddCitations,
    PersonalizeTone,
    VaryTransitions,
    FixFormatting,
    RestructureTemplate,
    AddFaqSection,
    AddTable,
    AddLists,
    AddH2Headings,
    AddKeywordToH2,
    AddKeywordToIntro,
    RewriteTitle,
    RewriteMetaDescription,
}

impl ImprovementType {
    pub const ALL: &'static [ImprovementType] = &[
        ImprovementType::CleanArtifacts,
        ImprovementType::HumanizeVocabulary,
        ImprovementType::VarySentenceLength,
        ImprovementType::RemovePuffery,
        ImprovementType::AddCitations,
        ImprovementType::PersonalizeTone,
        ImprovementType::VaryTransitions,
        ImprovementType::FixFormatting,
        ImprovementType::RestructureTemplate,
        ImprovementType::AddFaqSection,
        ImprovementType::AddTable,
        ImprovementType::AddLists,
        ImprovementType::AddH2Headings,
        ImprovementType::AddKeywordToH2,
        ImprovementType::AddKeywordToIntro,
        ImprovementType::RewriteTitle,
        ImprovementType::RewriteMetaDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImprovementType::CleanArtifacts => "clean_artifacts",
            ImprovementType::HumanizeVocabulary => "humanize_vocabulary",
            ImprovementType::VarySentenceLength => "vary_sentence_length",
            ImprovementType::RemovePuffery => "remove_puffery",
            ImprovementType::AddCitations => "add_citations",
            ImprovementType::PersonalizeTone => "personalize_tone",
            ImprovementType::VaryTransitions => "vary_transitions",
            ImprovementType::FixFormatting => "fix_formatting",
            ImprovementType::RestructureTemplate => "restructure_template",
            ImprovementType::AddFaqSection => "add_faq_section",
            ImprovementType::AddTable => "add_table",
            ImprovementType::AddLists => "add_lists",
            ImprovementType::AddH2Headings => "add_h2_headings",
            ImprovementType::AddKeywordToH2 => "add_keyword_to_h2",
            ImprovementType::AddKeywordToIntro => "add_keyword_to_intro",
            ImprovementType::RewriteTitle => "rewrite_title",
            ImprovementType::RewriteMetaDescription => "rewrite_meta_description",
        }
    }

    /// The article attribute this action produces.
    pub fn field(&self) -> ImprovementField {
        match self {
            ImprovementType::RewriteTitle => ImprovementField::Title,
            ImprovementType::RewriteMetaDescription => ImprovementField::MetaDescription,
            _ => ImprovementField::Content,
        }
    }

    fn done_message(&self) -> &'static str {
        match self {
            ImprovementType::CleanArtifacts => "Removed residual AI-tool artifacts",
            ImprovementType::HumanizeVocabulary => "Replaced AI-flavored vocabulary",
            ImprovementType::VarySentenceLength => "Varied sentence rhythm",
            ImprovementType::RemovePuffery => "Removed promotional puffery",
            ImprovementType::AddCitations => "Tightened unsourced attributions",
            ImprovementType::PersonalizeTone => "Personalized the narrative voice",
            ImprovementType::VaryTransitions => "Varied paragraph transitions",
            ImprovementType::FixFormatting => "Normalized formatting",
            ImprovementType::RestructureTemplate => "Broke up templated structure",
            ImprovementType::AddFaqSection => "Added an FAQ section",
            ImprovementType::AddTable => "Inserted a summary table",
            ImprovementType::AddLists => "Inserted a bulleted list",
            ImprovementType::AddH2Headings => "Inserted a new section",
            ImprovementType::AddKeywordToH2 => "Worked the keyword into section headings",
            ImprovementType::AddKeywordToIntro => "Worked the keyword into the introduction",
            ImprovementType::RewriteTitle => "Rewrote the title",
            ImprovementType::RewriteMetaDescription => "Rewrote the meta description",
        }
    }
}

impl fmt::Display for ImprovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImprovementType {
    type Err = ImproveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|ty| ty.as_str() == s)
            .copied()
            .ok_or_else(|| ImproveError::UnknownType(s.to_string()))
    }
}

#[derive(Error, Debug)]
pub enum ImproveError {
    /// Invalid argument; not retryable. Raised before any generator contact.
    #[error("unknown improvement type: {0}")]
    UnknownType(String),

    /// The collaborator failed; retrying later may succeed.
    #[error("text generation failed for {operation}: {source}")]
    Generation {
        operation: &'static str,
        source: GenerateError,
    },

    /// The collaborator answered with nothing usable.
    #[error("generator returned empty content for {0}")]
    EmptyResponse(&'static str),
}

// ---------------------------------------------------------------------------
// Rule-based artifact cleanup
// ---------------------------------------------------------------------------

static TRAILING_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());
static EXCESS_BLANK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static DOUBLED_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Strip known AI-tool residue without touching the surrounding prose.
pub fn clean_artifacts(content: &str) -> String {
    let cleaned = CITATION_ARTIFACT_RE.replace_all(content, "");
    let cleaned = TRACKING_PARAM_RE.replace_all(&cleaned, "");
    let cleaned = AI_SELF_REF_SENTENCE_RE.replace_all(&cleaned, "");
    let cleaned = DOUBLED_SPACE_RE.replace_all(&cleaned, " ");
    let cleaned = TRAILING_WS_RE.replace_all(&cleaned, "");
    let cleaned = EXCESS_BLANK_RE.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}

// ---------------------------------------------------------------------------
// Text surgery helpers
// ---------------------------------------------------------------------------

/// Insert a generated fragment before the article's closing stretch
/// (conclusion or FAQ heading) when one exists, else append it.
fn splice_before_closing(content: &str, fragment: &str) -> String {
    match CLOSING_SECTION_RE.find(content) {
        Some(m) => format!(
            "{}\n\n{}\n\n{}",
            content[..m.start()].trim_end(),
            fragment.trim(),
            &content[m.start()..]
        ),
        None => format!("{}\n\n{}\n", content.trim_end(), fragment.trim()),
    }
}

/// Byte offset just past the first `n` whitespace-delimited words.
fn leading_words_end(content: &str, n: usize) -> usize {
    let mut seen = 0usize;
    let mut in_word = false;
    for (i, ch) in content.char_indices() {
        if ch.is_whitespace() {
            if in_word {
                seen += 1;
                if seen == n {
                    return i;
                }
                in_word = false;
            }
        } else {
            in_word = true;
        }
    }
    content.len()
}

/// Swap the article's H2 heading lines for the generator's, pairwise and in
/// order. Extra returned lines are ignored; missing ones leave the original.
fn replace_h2_lines(content: &str, new_lines: &[&str]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0usize;
    for (m, line) in H2_LINE_RE.find_iter(content).zip(new_lines) {
        let line = line.trim();
        out.push_str(&content[cursor..m.start()]);
        if line.starts_with("##") {
            out.push_str(line);
        } else {
            out.push_str("## ");
            out.push_str(line);
        }
        cursor = m.end();
    }
    out.push_str(&content[cursor..]);
    out
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// String-tag entry point; validates the tag before doing anything else.
pub fn dispatch_improvement(
    article: &Article<'_>,
    improvement_type: &str,
    generator: &dyn TextGenerator,
) -> Result<ImprovementResult, ImproveError> {
    let improvement: ImprovementType = improvement_type.parse()?;
    dispatch(article, improvement, generator)
}

pub fn dispatch(
    article: &Article<'_>,
    improvement: ImprovementType,
    generator: &dyn TextGenerator,
) -> Result<ImprovementResult, ImproveError> {
    debug!(improvement = %improvement, "dispatching improvement");

    let value = match improvement {
        ImprovementType::CleanArtifacts => clean_artifacts(article.content),

        ImprovementType::AddTable | ImprovementType::AddLists | ImprovementType::AddH2Headings => {
            let fragment = delegate(article, improvement, article.content, generator)?;
            splice_before_closing(article.content, &fragment)
        }

        ImprovementType::AddKeywordToH2 => {
            let h2_lines: Vec<&str> = H2_LINE_RE
                .find_iter(article.content)
                .map(|m| m.as_str())
                .collect();
            if h2_lines.is_empty() {
                return Ok(ImprovementResult {
                    field: improvement.field(),
                    value: article.content.to_string(),
                    message: "No section headings to update".to_string(),
                });
            }
            let reply = delegate(article, improvement, &h2_lines.join("\n"), generator)?;
            let new_lines: Vec<&str> = reply.lines().filter(|l| !l.trim().is_empty()).collect();
            replace_h2_lines(article.content, &new_lines)
        }

        ImprovementType::AddKeywordToIntro => {
            let end = leading_words_end(article.content, INTRO_SPAN_WORDS);
            let reworked = delegate(article, improvement, &article.content[..end], generator)?;
            format!("{}{}", reworked, &article.content[end..])
        }

        // Full-text rewrites and the single-field rewrites all pass the
        // whole article through and use the reply verbatim.
        _ => delegate(article, improvement, article.content, generator)?,
    };

    Ok(ImprovementResult {
        field: improvement.field(),
        value,
        message: improvement.done_message().to_string(),
    })
}

fn delegate(
    article: &Article<'_>,
    improvement: ImprovementType,
    payload: &str,
    generator: &dyn TextGenerator,
) -> Result<String, ImproveError> {
    let prompt = prompts::user_prompt(improvement, article, payload);
    let reply = generator
        .generate(
            prompts::SYSTEM_PROMPT,
            &prompt,
            DEFAULT_MAX_TOKENS,
            DEFAULT_TIMEOUT_SECS,
        )
        .map_err(|source| ImproveError::Generation {
            operation: improvement.as_str(),
            source,
        })?;

    let reply = reply.trim();
    if reply.is_empty() {
        return Err(ImproveError::EmptyResponse(improvement.as_str()));
    }
    Ok(reply.to_string())
}

/// Drive a batch of improvements against one article. Failures stay inline;
/// one bad item never aborts the rest.
pub fn run_improvements(
    article: &Article<'_>,
    improvements: &[ImprovementType],
    generator: &dyn TextGenerator,
) -> Vec<(ImprovementType, Result<ImprovementResult, ImproveError>)> {
    improvements
        .iter()
        .map(|&improvement| {
            let outcome = dispatch(article, improvement, generator);
            if let Err(err) = &outcome {
                tracing::warn!(improvement = %improvement, error = %err, "improvement failed");
            }
            (improvement, outcome)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
