//! Compiled pattern tables shared by the layer scorers and the artifact cleaner.
//!
//! All tables are process-wide immutable configuration: compiled once via
//! `Lazy`, never mutated at runtime.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Technical artifacts
// ---------------------------------------------------------------------------

/// Residual citation markers left behind by AI research tools.
pub(crate) static CITATION_ARTIFACT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"【\d+(?::\d+)?†[^】]*】|\[oai_citation[^\]]*\]|::contentReference\[[^\]]*\]")
        .unwrap()
});

pub(crate) static TRACKING_PARAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[?&]utm_(?:source|medium|campaign|term|content)=[^\s&"')>]+"#).unwrap()
});

pub(crate) static AI_DISCLAIMER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\bas an ai(?: language)? model\b",
        r"|\bas a large language model\b",
        r"|\bi (?:don'?t|do not) have access to\b",
        r"|\bmy (?:knowledge|training) (?:cutoff|data)\b",
    ))
    .unwrap()
});

/// Whole sentences containing an AI self-reference, for removal by the cleaner.
pub(crate) static AI_SELF_REF_SENTENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)[^.!?\n]*(?:\bas an ai(?: language)? model\b",
        r"|\bas a large language model\b",
        r"|\bi (?:don'?t|do not) have access to\b)",
        r"[^.!?\n]*[.!?]?",
    ))
    .unwrap()
});

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Words language models lean on far more often than human authors do.
pub(crate) static AI_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    let words = [
        "delve",
        "delves",
        "delving",
        "leverage",
        "leveraging",
        "robust",
        "seamless",
        "seamlessly",
        "pivotal",
        "crucial",
        "paramount",
        "holistic",
        "multifaceted",
        "meticulous",
        "comprehensive",
        "tapestry",
        "landscape",
        "journey",
        "realm",
        "paradigm",
        "testament",
        "synergy",
        "nexus",
        "odyssey",
        "pinnacle",
        "intricacies",
        "elevate",
        "foster",
        "harness",
        "unleash",
        "unlock",
        "streamline",
        "navigate",
        "underscore",
        "showcase",
        "embrace",
        "empower",
        "transformative",
        "unparalleled",
        "unprecedented",
        "groundbreaking",
        "cutting-edge",
        "game-changing",
        "revolutionary",
        "innovative",
        "invaluable",
        "furthermore",
        "moreover",
    ];
    let alt = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alt})\b")).unwrap()
});

/// Overused multi-word framings. Matched by containment, not sentence-aware;
/// the wildcard entry can span clause boundaries on pathological input, and
/// that is the intended semantics.
pub(crate) static AI_PHRASE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    let literal = [
        "it's worth noting",
        "it's important to note",
        "at the end of the day",
        "in today's fast-paced world",
        "in the ever-evolving",
        "when it comes to",
        "dive deep into",
        "unlock the full potential",
        "a game changer",
        "look no further",
        "let's dive in",
        "without further ado",
        "the possibilities are endless",
        "stand the test of time",
        "a wealth of",
        "treasure trove",
        "elevate your",
        "embark on a journey",
        "harness the power of",
        "in the realm of",
        "navigate the complexities of",
        "best practices",
        "key takeaways",
        "in conclusion",
        "first and foremost",
        "a testament to",
        "plays a crucial role",
    ];
    let mut res: Vec<Regex> = literal
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", regex::escape(p))).unwrap())
        .collect();
    res.push(Regex::new(r"(?i)take your .+ to the next level").unwrap());
    res
});

// ---------------------------------------------------------------------------
// Content patterns
// ---------------------------------------------------------------------------

pub(crate) static PUFFERY_RE: Lazy<Regex> = Lazy::new(|| {
    let words = [
        "amazing",
        "incredible",
        "revolutionary",
        "game-changing",
        "cutting-edge",
        "state-of-the-art",
        "world-class",
        "best-in-class",
        "top-notch",
        "unrivaled",
        "exceptional",
        "extraordinary",
        "remarkable",
        "phenomenal",
        "outstanding",
        "stunning",
        "breathtaking",
        "jaw-dropping",
        "mind-blowing",
        "unbeatable",
        "spectacular",
        "magnificent",
    ];
    let alt = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alt})\b")).unwrap()
});

/// Formulaic opener templates, anchored at the start of a sentence.
pub(crate) static INTRO_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^in today'?s (?:fast-paced|digital|modern|ever-changing|competitive)")
            .unwrap(),
        Regex::new(r"(?i)^have you ever wondered").unwrap(),
        Regex::new(r"(?i)^in (?:this|the following) (?:article|post|guide),? (?:we|you)(?:'ll| will)")
            .unwrap(),
        Regex::new(r"(?i)^are you (?:looking|struggling|tired|ready)").unwrap(),
        Regex::new(r"(?i)^(?:picture|imagine) this[:.]").unwrap(),
    ]
});

pub(crate) static CONCLUSION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^in conclusion\b").unwrap(),
        Regex::new(r"(?i)^to (?:sum up|summarize|wrap up)\b").unwrap(),
        Regex::new(r"(?i)^(?:all in all|at the end of the day)\b").unwrap(),
    ]
});

pub(crate) static HEDGING_RE: Lazy<Regex> = Lazy::new(|| {
    let phrases = [
        "it's important to note",
        "it's worth noting",
        "generally speaking",
        "in most cases",
        "more often than not",
        "it goes without saying",
    ];
    let alt = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{alt})")).unwrap()
});

// ---------------------------------------------------------------------------
// Citation verification
// ---------------------------------------------------------------------------

/// Attribution without an attributable source.
pub(crate) static VAGUE_ATTRIBUTION_RE: Lazy<Regex> = Lazy::new(|| {
    let phrases = [
        "studies show",
        "studies have shown",
        "research shows",
        "research suggests",
        "experts say",
        "experts agree",
        "experts believe",
        "scientists say",
        "many people believe",
        "it is widely believed",
        "according to research",
        "data shows",
        "statistics show",
        "surveys show",
        "evidence suggests",
    ];
    let alt = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{alt})")).unwrap()
});

pub(crate) static STAT_CLAIM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b\d{1,3}% of ",
        r"(?:people|users|businesses|companies|consumers|customers|marketers|professionals|adults|americans)\b",
    ))
    .unwrap()
});

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

pub(crate) static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s{0,3}(#{1,6})\s+(.+?)\s*$").unwrap());

pub(crate) static H2_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s{0,3}##(?:[^#\n].*)?$").unwrap());

pub(crate) static BOLD_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*[^*\n]+\*\*").unwrap());

pub(crate) static BULLET_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*+]\s|\d+[.)]\s)").unwrap());

pub(crate) static HEADING_PARENTHETICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()]*\)$").unwrap());

// ---------------------------------------------------------------------------
// Coherence
// ---------------------------------------------------------------------------

/// Generic discourse transitions. Two entries are bigrams; the scorer matches
/// those over adjacent token pairs.
pub(crate) const TRANSITIONS: &[&str] = &[
    "furthermore",
    "moreover",
    "additionally",
    "however",
    "therefore",
    "consequently",
    "nevertheless",
    "nonetheless",
    "similarly",
    "likewise",
    "meanwhile",
    "subsequently",
    "ultimately",
    "importantly",
    "notably",
    "essentially",
    "firstly",
    "secondly",
    "in addition",
    "in contrast",
];

pub(crate) static TRANSITION_SINGLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    TRANSITIONS
        .iter()
        .copied()
        .filter(|t| !t.contains(' '))
        .collect()
});

pub(crate) static TRANSITION_BIGRAMS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    TRANSITIONS
        .iter()
        .copied()
        .filter(|t| t.contains(' '))
        .collect()
});

// ---------------------------------------------------------------------------
// Template patterns
// ---------------------------------------------------------------------------

pub(crate) static FAQ_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:frequently asked questions|faqs?)\b").unwrap()
});

/// Three families of image-placeholder lines: labeled prompts, bare
/// adjective-plus-visual-noun descriptions, and bracketed alt text that never
/// got a URL attached.
pub(crate) static IMAGE_PLACEHOLDER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^\s*(?:featured\s+)?image(?:\s+\d+)?\s*(?:of\b|showing\b|depicting\b|:)")
            .unwrap(),
        Regex::new(concat!(
            r"(?i)^\s*an?\s+",
            r"(?:professional|modern|clean|vibrant|detailed|minimalist|sleek|stylized|photorealistic)\s+",
            r"(?:photo(?:graph)?|image|illustration|graphic|rendering|shot)\b",
        ))
        .unwrap(),
        Regex::new(r"^\s*\[[^\]\n]{8,}\]\s*$").unwrap(),
    ]
});

pub(crate) const CALLOUT_LABELS: &[&str] = &[
    "key takeaway",
    "pro tip",
    "quick tip",
    "important note",
    "fun fact",
    "did you know",
    "bonus tip",
    "expert tip",
];

pub(crate) static CTA_HEADING_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^where\s+.+\s+fits\b").unwrap(),
        Regex::new(r"(?i)^how\s+.+\s+can\s+help\b").unwrap(),
        Regex::new(r"(?i)^why\s+choose\s+\S").unwrap(),
        Regex::new(r"(?i)^getting\s+started\s+with\s+\S").unwrap(),
    ]
});

pub(crate) static CONCLUSION_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:conclusion|final thoughts|wrapping up)\b").unwrap()
});

/// Heading that marks the closing stretch of an article; generated sections
/// are spliced in just above it.
pub(crate) static CLOSING_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?im)^\s{0,3}#{2,3}\s*",
        r"(?:conclusion|final thoughts|wrapping up|faqs?\b|frequently asked questions)",
    ))
    .unwrap()
});

// ---------------------------------------------------------------------------
// Token normalization
// ---------------------------------------------------------------------------

pub(crate) static PUNCT_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\w]+|[^\w]+$").unwrap());

/// Lowercase a token and strip surrounding punctuation.
pub(crate) fn normalize_token(token: &str) -> String {
    PUNCT_STRIP_RE.replace_all(token, "").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_artifacts_match_known_markers() {
        assert!(CITATION_ARTIFACT_RE.is_match("as seen here 【4:0†source】 in the text"));
        assert!(CITATION_ARTIFACT_RE.is_match("[oai_citation:1‡example.com]"));
        assert!(!CITATION_ARTIFACT_RE.is_match("an ordinary [bracketed] aside"));
    }

    #[test]
    fn tracking_params_match_utm_query_strings() {
        assert!(TRACKING_PARAM_RE.is_match("https://example.com/?utm_source=chatgpt.com"));
        assert!(!TRACKING_PARAM_RE.is_match("https://example.com/?page=2"));
    }

    #[test]
    fn ai_disclaimers_match_case_insensitively() {
        assert!(AI_DISCLAIMER_RE.is_match("As an AI language model, I cannot say."));
        assert!(AI_DISCLAIMER_RE.is_match("as an ai model it would be wrong"));
        assert!(!AI_DISCLAIMER_RE.is_match("the AI model we trained converged"));
    }

    #[test]
    fn wildcard_phrase_spans_arbitrary_middles() {
        let re = AI_PHRASE_RES.last().unwrap();
        assert!(re.is_match("take your marketing strategy to the next level"));
    }

    #[test]
    fn transition_tables_partition_cleanly() {
        assert_eq!(
            TRANSITION_SINGLES.len() + TRANSITION_BIGRAMS.len(),
            TRANSITIONS.len()
        );
        assert!(TRANSITION_SINGLES.contains("furthermore"));
        assert!(TRANSITION_BIGRAMS.contains(&"in addition"));
    }

    #[test]
    fn normalize_token_strips_punctuation() {
        assert_eq!(normalize_token("However,"), "however");
        assert_eq!(normalize_token("(we)"), "we");
        assert_eq!(normalize_token("..."), "");
    }
}
