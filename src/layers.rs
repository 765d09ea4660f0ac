//! The nine independent layer scorers.
//!
//! Each scorer is a pure function of [`AnalyzedText`] returning a
//! [`LayerResult`] with a fixed `max`. Scorers share no state and may run in
//! any order. Threshold tables are ordered `(threshold, points)` pairs
//! evaluated top-down.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map};

use crate::patterns::*;
use crate::text::AnalyzedText;
use crate::LayerResult;

pub(crate) const TECHNICAL_ARTIFACTS_MAX: u32 = 10;
pub(crate) const VOCABULARY_MAX: u32 = 20;
pub(crate) const STRUCTURAL_MAX: u32 = 15;
pub(crate) const CONTENT_MAX: u32 = 15;
pub(crate) const CITATION_MAX: u32 = 5;
pub(crate) const FORMATTING_MAX: u32 = 10;
pub(crate) const STYLOMETRIC_MAX: u32 = 10;
pub(crate) const COHERENCE_MAX: u32 = 10;
pub(crate) const TEMPLATE_MAX: u32 = 15;

// ---------------------------------------------------------------------------
// Threshold tables
// ---------------------------------------------------------------------------

type Buckets = &'static [(f64, u32)];

const VOCAB_DENSITY_BUCKETS: Buckets = &[(5.0, 20), (3.0, 15), (2.0, 10), (1.0, 5), (0.5, 2)];
const SENTENCE_CV_BUCKETS: Buckets = &[(20.0, 8), (30.0, 5), (35.0, 2)];
const PARAGRAPH_CV_BUCKETS: Buckets = &[(20.0, 2), (30.0, 1)];
const REPEATED_OPENER_BUCKETS: Buckets = &[(3.0, 5), (2.0, 3), (1.0, 1)];
const PUFFERY_BUCKETS: Buckets = &[(8.0, 5), (4.0, 3), (2.0, 1)];
const HEDGING_BUCKETS: Buckets = &[(3.0, 4), (2.0, 2), (1.0, 1)];
const VAGUE_ATTRIBUTION_BUCKETS: Buckets = &[(4.0, 4), (2.0, 2), (1.0, 1)];
const TITLE_CASE_BUCKETS: Buckets = &[(0.8, 3), (0.5, 1)];
const BOLD_DENSITY_BUCKETS: Buckets = &[(5.0, 3), (3.0, 2), (2.0, 1)];
const EMOJI_BUCKETS: Buckets = &[(10.0, 2), (5.0, 1)];
const HEADING_PATTERN_BUCKETS: Buckets = &[(4.0, 2), (3.0, 1)];
const PRONOUN_DENSITY_BUCKETS: Buckets = &[(0.5, 4), (1.0, 2)];
const TRANSITION_DENSITY_BUCKETS: Buckets = &[(2.0, 5), (1.0, 3), (0.5, 1)];
const TRANSITION_OPENER_BUCKETS: Buckets = &[(0.4, 5), (0.25, 3), (0.15, 1)];

/// First row whose threshold the value meets or exceeds wins.
fn bucket_at_least(value: f64, table: Buckets) -> u32 {
    table
        .iter()
        .find(|(t, _)| value >= *t)
        .map(|&(_, p)| p)
        .unwrap_or(0)
}

/// First row whose threshold the value stays below wins.
fn bucket_below(value: f64, table: Buckets) -> u32 {
    table
        .iter()
        .find(|(t, _)| value < *t)
        .map(|&(_, p)| p)
        .unwrap_or(0)
}

/// stdev/mean as a percentage; `None` when there is nothing to measure.
fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean <= 0.0 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt() / mean * 100.0)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// 1. Technical artifacts (max 10)
// ---------------------------------------------------------------------------

pub(crate) fn technical_artifacts(text: &AnalyzedText) -> LayerResult {
    let content = text.raw_content();
    let families: [(&str, usize); 3] = [
        ("citation_markers", CITATION_ARTIFACT_RE.find_iter(content).count()),
        ("tracking_params", TRACKING_PARAM_RE.find_iter(content).count()),
        ("ai_disclaimers", AI_DISCLAIMER_RE.find_iter(content).count()),
    ];

    let found: Vec<&str> = families
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(name, _)| *name)
        .collect();
    let score = (found.len() as u32 * 5).min(TECHNICAL_ARTIFACTS_MAX);

    let mut details = Map::new();
    details.insert("artifact_types_found".into(), json!(found));
    for (name, n) in families {
        details.insert(format!("{name}_count"), json!(n));
    }
    LayerResult::new(score, TECHNICAL_ARTIFACTS_MAX, details)
}

// ---------------------------------------------------------------------------
// 2. Vocabulary patterns (max 20)
// ---------------------------------------------------------------------------

pub(crate) fn vocabulary_patterns(text: &AnalyzedText) -> LayerResult {
    let plain = text.plain_text();

    let mut word_hits: HashMap<String, usize> = HashMap::new();
    for m in AI_WORD_RE.find_iter(plain) {
        *word_hits.entry(m.as_str().to_lowercase()).or_insert(0) += 1;
    }
    let word_matches: usize = word_hits.values().sum();
    let phrase_matches: usize = AI_PHRASE_RES
        .iter()
        .map(|re| re.find_iter(plain).count())
        .sum();

    let matches = word_matches + phrase_matches;
    let density = matches as f64 / text.word_count() as f64 * 100.0;
    let score = bucket_at_least(density, VOCAB_DENSITY_BUCKETS);

    let mut flagged: Vec<(String, usize)> = word_hits.into_iter().collect();
    flagged.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    flagged.truncate(10);

    let mut details = Map::new();
    details.insert("word_matches".into(), json!(word_matches));
    details.insert("phrase_matches".into(), json!(phrase_matches));
    details.insert("density_pct".into(), json!(round2(density)));
    details.insert(
        "top_flagged_words".into(),
        json!(flagged.iter().map(|(w, _)| w.as_str()).collect::<Vec<_>>()),
    );
    LayerResult::new(score, VOCABULARY_MAX, details)
}

// ---------------------------------------------------------------------------
// 3. Structural analysis (max 15)
// ---------------------------------------------------------------------------

pub(crate) fn structural_analysis(text: &AnalyzedText) -> LayerResult {
    let mut score = 0u32;
    let mut details = Map::new();

    // Sentence-length uniformity
    let sentence_lengths: Vec<f64> = text
        .sentences()
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .filter(|&n| n >= 1.0)
        .collect();
    if sentence_lengths.len() >= 5 {
        if let Some(cv) = coefficient_of_variation(&sentence_lengths) {
            score += bucket_below(cv, SENTENCE_CV_BUCKETS);
            details.insert("sentence_length_cv".into(), json!(round2(cv)));
        }
    }

    // Repeated two-word sentence openers
    let mut opener_counts: HashMap<String, usize> = HashMap::new();
    for sentence in text.sentences() {
        let mut words = sentence.split_whitespace();
        if let (Some(a), Some(b)) = (words.next(), words.next()) {
            let bigram = format!("{} {}", normalize_token(a), normalize_token(b));
            *opener_counts.entry(bigram).or_insert(0) += 1;
        }
    }
    let repeated_openers: Vec<String> = opener_counts
        .iter()
        .filter(|(_, &n)| n >= 3)
        .map(|(k, _)| k.clone())
        .collect();
    score += bucket_at_least(repeated_openers.len() as f64, REPEATED_OPENER_BUCKETS);
    details.insert("repeated_openers".into(), json!(repeated_openers));

    // Paragraph-length uniformity
    let paragraph_lengths: Vec<f64> = text
        .paragraphs()
        .iter()
        .map(|p| p.split_whitespace().count() as f64)
        .filter(|&n| n > 10.0)
        .collect();
    if paragraph_lengths.len() >= 4 {
        if let Some(cv) = coefficient_of_variation(&paragraph_lengths) {
            score += bucket_below(cv, PARAGRAPH_CV_BUCKETS);
            details.insert("paragraph_length_cv".into(), json!(round2(cv)));
        }
    }

    LayerResult::new(score, STRUCTURAL_MAX, details)
}

// ---------------------------------------------------------------------------
// 4. Content patterns (max 15)
// ---------------------------------------------------------------------------

pub(crate) fn content_patterns(text: &AnalyzedText) -> LayerResult {
    let plain = text.plain_text();
    let mut score = 0u32;
    let mut details = Map::new();

    let puffery = PUFFERY_RE.find_iter(plain).count();
    score += bucket_at_least(puffery as f64, PUFFERY_BUCKETS);
    details.insert("puffery_count".into(), json!(puffery));

    let intro_matches: usize = text
        .sentences()
        .iter()
        .filter(|s| INTRO_RES.iter().any(|re| re.is_match(s)))
        .count();
    score += ((intro_matches as u32) * 2).min(4);
    details.insert("formulaic_intro_count".into(), json!(intro_matches));

    let has_formulaic_conclusion = text
        .sentences()
        .iter()
        .any(|s| CONCLUSION_RES.iter().any(|re| re.is_match(s)));
    if has_formulaic_conclusion {
        score += 2;
    }
    details.insert(
        "formulaic_conclusion".into(),
        json!(has_formulaic_conclusion),
    );

    let hedging = HEDGING_RE.find_iter(plain).count();
    score += bucket_at_least(hedging as f64, HEDGING_BUCKETS);
    details.insert("hedging_count".into(), json!(hedging));

    LayerResult::new(score, CONTENT_MAX, details)
}

// ---------------------------------------------------------------------------
// 5. Citation verification (max 5)
// ---------------------------------------------------------------------------

pub(crate) fn citation_verification(text: &AnalyzedText) -> LayerResult {
    let plain = text.plain_text();
    let mut score = 0u32;
    let mut details = Map::new();

    let vague: Vec<String> = VAGUE_ATTRIBUTION_RE
        .find_iter(plain)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    score += bucket_at_least(vague.len() as f64, VAGUE_ATTRIBUTION_BUCKETS);
    details.insert("vague_attribution_count".into(), json!(vague.len()));
    details.insert("vague_attributions".into(), json!(vague));

    let stats = STAT_CLAIM_RE.find_iter(plain).count();
    if stats >= 2 {
        score += 1;
    }
    details.insert("unsourced_stat_count".into(), json!(stats));

    LayerResult::new(score, CITATION_MAX, details)
}

// ---------------------------------------------------------------------------
// 6. Formatting analysis (max 10)
// ---------------------------------------------------------------------------

static TOP_N_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^top \d").unwrap());

fn is_title_case(heading: &str) -> bool {
    let words: Vec<&str> = heading.split_whitespace().collect();
    if words.len() < 3 {
        return false;
    }
    let capitalized = words
        .iter()
        .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        .count();
    capitalized as f64 / words.len() as f64 >= 0.8
}

fn heading_lead_pattern(heading: &str) -> Option<&'static str> {
    let lower = heading.to_lowercase();
    if lower.starts_with("how to") {
        Some("how to")
    } else if lower.starts_with("what is") {
        Some("what is")
    } else if lower.starts_with("why ") {
        Some("why")
    } else if TOP_N_RE.is_match(&lower) {
        Some("top n")
    } else if lower.starts_with("best ") {
        Some("best")
    } else if lower.starts_with("the ") {
        Some("the")
    } else if lower.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        Some("digit-led")
    } else {
        None
    }
}

fn is_emoji(ch: char) -> bool {
    matches!(u32::from(ch), 0x1F300..=0x1FAFF | 0x2600..=0x27BF)
}

pub(crate) fn formatting_analysis(text: &AnalyzedText) -> LayerResult {
    let content = text.raw_content();
    let mut score = 0u32;
    let mut details = Map::new();

    let headings: Vec<String> = HEADING_RE
        .captures_iter(content)
        .map(|c| c[2].trim().to_string())
        .collect();

    // Title Case ratio among headings long enough to judge
    let eligible: Vec<&String> = headings
        .iter()
        .filter(|h| h.split_whitespace().count() >= 3)
        .collect();
    if !eligible.is_empty() {
        let title_cased = eligible.iter().filter(|h| is_title_case(h)).count();
        let ratio = title_cased as f64 / eligible.len() as f64;
        score += bucket_at_least(ratio, TITLE_CASE_BUCKETS);
        details.insert("title_case_ratio".into(), json!(round2(ratio)));
    }

    // Bold markup density
    let bold_spans = BOLD_SPAN_RE.find_iter(content).count();
    let bold_per_100 = bold_spans as f64 / text.word_count() as f64 * 100.0;
    score += bucket_at_least(bold_per_100, BOLD_DENSITY_BUCKETS);
    details.insert("bold_spans".into(), json!(bold_spans));
    details.insert("bold_per_100_words".into(), json!(round2(bold_per_100)));

    // Emoji
    let emoji_count = content.chars().filter(|&c| is_emoji(c)).count();
    score += bucket_at_least(emoji_count as f64, EMOJI_BUCKETS);
    details.insert("emoji_count".into(), json!(emoji_count));

    // Repeated heading templates
    if headings.len() >= 4 {
        let mut pattern_counts: HashMap<&'static str, usize> = HashMap::new();
        for h in &headings {
            if let Some(p) = heading_lead_pattern(h) {
                *pattern_counts.entry(p).or_insert(0) += 1;
            }
        }
        if let Some((pattern, n)) = pattern_counts.into_iter().max_by_key(|&(_, n)| n) {
            score += bucket_at_least(n as f64, HEADING_PATTERN_BUCKETS);
            details.insert("dominant_heading_pattern".into(), json!(pattern));
            details.insert("dominant_heading_pattern_count".into(), json!(n));
        }
    }
    details.insert("heading_count".into(), json!(headings.len()));

    LayerResult::new(score.min(FORMATTING_MAX), FORMATTING_MAX, details)
}

// ---------------------------------------------------------------------------
// 7. Stylometric (max 10)
// ---------------------------------------------------------------------------

const FIRST_SINGULAR: &[&str] = &["i", "me", "my", "mine", "myself"];
const SECOND_PERSON: &[&str] = &["you", "your", "yours", "yourself", "yourselves"];
const FIRST_PLURAL: &[&str] = &["we", "us", "our", "ours", "ourselves"];

pub(crate) fn stylometric(text: &AnalyzedText) -> LayerResult {
    let mut score = 0u32;
    let mut details = Map::new();

    let mut first_singular = 0usize;
    let mut second_person = 0usize;
    let mut first_plural = 0usize;
    for token in text.plain_text().split_whitespace() {
        let t = normalize_token(token);
        if FIRST_SINGULAR.contains(&t.as_str()) {
            first_singular += 1;
        } else if SECOND_PERSON.contains(&t.as_str()) {
            second_person += 1;
        } else if FIRST_PLURAL.contains(&t.as_str()) {
            first_plural += 1;
        }
    }

    let pronoun_density =
        (first_singular + second_person + first_plural) as f64 / text.word_count() as f64 * 100.0;
    score += bucket_below(pronoun_density, PRONOUN_DENSITY_BUCKETS);
    details.insert("pronoun_density_pct".into(), json!(round2(pronoun_density)));
    details.insert("first_person_count".into(), json!(first_singular));
    details.insert("second_person_count".into(), json!(second_person));
    details.insert("first_plural_count".into(), json!(first_plural));

    // A "we" that never says "I" reads as press-release voice
    let corporate_voice = first_plural > 5 && first_singular == 0;
    if corporate_voice {
        score += 2;
    }
    details.insert("corporate_voice".into(), json!(corporate_voice));

    if !text.sentences().is_empty() {
        let n = text.sentences().len() as f64;
        let simple = text
            .sentences()
            .iter()
            .filter(|s| s.split_whitespace().count() <= 10)
            .count() as f64
            / n;
        let complex = text
            .sentences()
            .iter()
            .filter(|s| s.split_whitespace().count() > 25)
            .count() as f64
            / n;
        let mix_points = if simple < 0.05 && complex < 0.05 {
            4
        } else if simple < 0.10 && complex < 0.10 {
            2
        } else {
            0
        };
        score += mix_points;
        details.insert("simple_sentence_fraction".into(), json!(round2(simple)));
        details.insert("complex_sentence_fraction".into(), json!(round2(complex)));
    }

    LayerResult::new(score.min(STYLOMETRIC_MAX), STYLOMETRIC_MAX, details)
}

// ---------------------------------------------------------------------------
// 8. Coherence (max 10)
// ---------------------------------------------------------------------------

pub(crate) fn coherence(text: &AnalyzedText) -> LayerResult {
    let mut score = 0u32;
    let mut details = Map::new();

    let tokens: Vec<String> = text
        .plain_text()
        .split_whitespace()
        .map(normalize_token)
        .collect();
    let mut transition_count = tokens
        .iter()
        .filter(|t| TRANSITION_SINGLES.contains(t.as_str()))
        .count();
    for pair in tokens.windows(2) {
        let bigram = format!("{} {}", pair[0], pair[1]);
        if TRANSITION_BIGRAMS.contains(&bigram.as_str()) {
            transition_count += 1;
        }
    }

    let density = transition_count as f64 / text.word_count() as f64 * 100.0;
    score += bucket_at_least(density, TRANSITION_DENSITY_BUCKETS);
    details.insert("transition_count".into(), json!(transition_count));
    details.insert("transition_density_pct".into(), json!(round2(density)));

    if !text.paragraphs().is_empty() {
        let opener_hits = text
            .paragraphs()
            .iter()
            .filter(|p| {
                let mut words = p.split_whitespace();
                let first = words.next().map(|w| normalize_token(w)).unwrap_or_default();
                if TRANSITION_SINGLES.contains(first.as_str()) {
                    return true;
                }
                match words.next() {
                    Some(second) => {
                        let bigram = format!("{} {}", first, normalize_token(second));
                        TRANSITION_BIGRAMS.contains(&bigram.as_str())
                    }
                    None => false,
                }
            })
            .count();
        let ratio = opener_hits as f64 / text.paragraphs().len() as f64;
        score += bucket_at_least(ratio, TRANSITION_OPENER_BUCKETS);
        details.insert("transition_opener_ratio".into(), json!(round2(ratio)));
    }

    LayerResult::new(score.min(COHERENCE_MAX), COHERENCE_MAX, details)
}

// ---------------------------------------------------------------------------
// 9. Template patterns (max 15)
// ---------------------------------------------------------------------------

struct Heading {
    level: usize,
    text: String,
}

fn headings_of(content: &str) -> Vec<Heading> {
    HEADING_RE
        .captures_iter(content)
        .map(|c| Heading {
            level: c[1].len(),
            text: c[2].trim().to_string(),
        })
        .collect()
}

fn faq_question_count(headings: &[Heading]) -> usize {
    for (i, h) in headings.iter().enumerate() {
        if FAQ_HEADING_RE.is_match(&h.text) {
            return headings[i + 1..]
                .iter()
                .take_while(|sub| sub.level > h.level)
                .filter(|sub| sub.text.ends_with('?'))
                .count();
        }
    }
    0
}

fn image_placeholder_count(content: &str) -> usize {
    content
        .lines()
        .filter(|line| IMAGE_PLACEHOLDER_RES.iter().any(|re| re.is_match(line)))
        .count()
}

/// Sections delimited by H2 headings; each section body is the text between
/// one H2 line and the next.
fn h2_section_bodies(content: &str) -> Vec<&str> {
    let starts: Vec<(usize, usize)> = H2_LINE_RE
        .find_iter(content)
        .map(|m| (m.start(), m.end()))
        .collect();
    let mut bodies = Vec::with_capacity(starts.len());
    for (i, &(_, body_start)) in starts.iter().enumerate() {
        let body_end = starts
            .get(i + 1)
            .map(|&(next_start, _)| next_start)
            .unwrap_or(content.len());
        bodies.push(&content[body_start..body_end]);
    }
    bodies
}

fn is_bullet_sandwich(body: &str) -> bool {
    static BLANK_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
    let blocks: Vec<&str> = BLANK_SPLIT_RE
        .split(body)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();
    if blocks.len() < 3 {
        return false;
    }
    let is_list = |b: &str| BULLET_LINE_RE.is_match(b.lines().next().unwrap_or(""));
    let is_heading = |b: &str| b.trim_start().starts_with('#');
    let is_prose = |b: &str| !is_list(b) && !is_heading(b);

    is_prose(blocks[0])
        && is_prose(blocks[blocks.len() - 1])
        && blocks[1..blocks.len() - 1].iter().any(|b| is_list(b))
}

pub(crate) fn template_patterns(text: &AnalyzedText) -> LayerResult {
    let content = text.raw_content();
    let headings = headings_of(content);
    let mut score = 0u32;
    let mut details = Map::new();

    // (A) FAQ block
    let faq_questions = faq_question_count(&headings);
    score += match faq_questions {
        n if n >= 5 => 3,
        n if n >= 3 => 2,
        _ => 0,
    };
    details.insert("faq_question_count".into(), json!(faq_questions));

    // (B) Image placeholders
    let placeholders = image_placeholder_count(content);
    score += match placeholders {
        n if n >= 3 => 4,
        2 => 3,
        1 => 2,
        _ => 0,
    };
    details.insert("image_placeholder_count".into(), json!(placeholders));

    // (C) Callout labels
    let lower = content.to_lowercase();
    let callout_counts: Vec<(&str, usize)> = CALLOUT_LABELS
        .iter()
        .map(|label| (*label, lower.matches(label).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    let distinct = callout_counts.len();
    let total: usize = callout_counts.iter().map(|(_, n)| n).sum();
    score += if distinct >= 3 || total >= 4 {
        2
    } else if distinct >= 2 || total >= 3 {
        1
    } else {
        0
    };
    details.insert("callout_distinct".into(), json!(distinct));
    details.insert("callout_total".into(), json!(total));

    // (D) Bullet-sandwich sections
    let sections = h2_section_bodies(content);
    if sections.len() >= 3 {
        let sandwiches = sections.iter().filter(|s| is_bullet_sandwich(s)).count();
        let ratio = sandwiches as f64 / sections.len() as f64;
        if ratio >= 0.7 && sections.len() >= 4 {
            score += 2;
        } else if ratio >= 0.5 {
            score += 1;
        }
        details.insert("bullet_sandwich_ratio".into(), json!(round2(ratio)));
    }
    let has_cta = headings
        .iter()
        .any(|h| CTA_HEADING_RES.iter().any(|re| re.is_match(&h.text)));
    let has_faq = headings.iter().any(|h| FAQ_HEADING_RE.is_match(&h.text));
    let has_conclusion = headings
        .iter()
        .any(|h| CONCLUSION_HEADING_RE.is_match(&h.text));
    if has_cta && has_faq && has_conclusion {
        score += 1;
    }

    // (E) Annotated headings
    let annotated = headings
        .iter()
        .filter(|h| HEADING_PARENTHETICAL_RE.is_match(&h.text))
        .count();
    score += match annotated {
        n if n >= 4 => 2,
        3 => 1,
        _ => 0,
    };
    details.insert("annotated_heading_count".into(), json!(annotated));

    // (F) Soft-sell CTA heading
    if has_cta {
        score += 1;
    }
    details.insert("has_cta_heading".into(), json!(has_cta));

    LayerResult::new(score.min(TEMPLATE_MAX), TEMPLATE_MAX, details)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(body: &str) -> AnalyzedText {
        // Enough neutral filler to clear the minimum-content gate without
        // tripping any scorer.
        let filler = "The harbor master logged each arrival by hand. \
                      Two boats came in before dawn and three after. \
                      Rain kept the deckhands busy with tarps until noon. \
                      The ledger showed nothing unusual for a Tuesday. "
            .repeat(13);
        AnalyzedText::new(&format!("{body}\n\n{filler}"))
    }

    #[test]
    fn bucket_at_least_picks_first_matching_row() {
        assert_eq!(bucket_at_least(6.0, VOCAB_DENSITY_BUCKETS), 20);
        assert_eq!(bucket_at_least(2.5, VOCAB_DENSITY_BUCKETS), 10);
        assert_eq!(bucket_at_least(0.1, VOCAB_DENSITY_BUCKETS), 0);
    }

    #[test]
    fn bucket_below_picks_first_matching_row() {
        assert_eq!(bucket_below(12.0, SENTENCE_CV_BUCKETS), 8);
        assert_eq!(bucket_below(28.0, SENTENCE_CV_BUCKETS), 5);
        assert_eq!(bucket_below(50.0, SENTENCE_CV_BUCKETS), 0);
    }

    #[test]
    fn cv_is_zero_for_uniform_values() {
        let cv = coefficient_of_variation(&[15.0, 15.0, 15.0]).unwrap();
        assert!(cv < f64::EPSILON);
        assert!(coefficient_of_variation(&[]).is_none());
    }

    #[test]
    fn artifacts_score_five_per_family() {
        let text = padded("As an AI language model, I cannot help with that request here.");
        let result = technical_artifacts(&text);
        assert_eq!(result.score, 5);

        let text = padded(
            "As an AI language model, I cannot help. \
             See https://example.com/?utm_source=chatgpt.com for details.",
        );
        let result = technical_artifacts(&text);
        assert_eq!(result.score, 10, "two families should cap at max");
    }

    #[test]
    fn vocabulary_density_buckets_apply() {
        // 15 flagged words against ~440 filler words lands in the 3% bucket
        let body = "delve leverage robust tapestry paradigm ".repeat(3);
        let result = vocabulary_patterns(&padded(&body));
        assert_eq!(result.score, 15, "details: {:?}", result.details);
        assert!(result.details.contains_key("top_flagged_words"));
    }

    #[test]
    fn uniform_sentences_raise_structural_score() {
        let body = "The quarterly planning meeting covered staffing changes across both offices today. \
                    A revised travel policy goes into effect at the start of next month. \
                    Department leads presented updated hiring targets for the coming fiscal year. \
                    Finance walked everyone through the consolidated budget variance report line. \
                    Operations flagged a vendor delay affecting the warehouse expansion timeline soon. "
            .repeat(2);
        let text = AnalyzedText::new(&body.repeat(2));
        let result = structural_analysis(&text);
        assert!(
            result.score >= 5,
            "uniform 11-12 word sentences should score, got {:?}",
            result.details
        );
    }

    #[test]
    fn corporate_voice_detected() {
        let body = "We launched the platform. We scaled it. We refined our onboarding. \
                    Our customers trust our roadmap and we deliver for us all.";
        let result = stylometric(&padded(body));
        assert_eq!(result.details["corporate_voice"], json!(true));
    }

    #[test]
    fn faq_questions_counted_below_faq_heading() {
        let content = "## FAQ\n\n### What is this?\n\nText.\n\n### How does it work?\n\nText.\n\n### Why bother?\n\nText.\n\n## Other\n\n### Ignored?\n";
        let headings = headings_of(content);
        assert_eq!(faq_question_count(&headings), 3);
    }

    #[test]
    fn bullet_sandwich_requires_prose_list_prose() {
        assert!(is_bullet_sandwich(
            "\nSome prose intro here.\n\n- item one\n- item two\n\nClosing prose here.\n"
        ));
        assert!(!is_bullet_sandwich("\n- item\n\nProse only after.\n"));
    }

    #[test]
    fn title_case_needs_three_words() {
        assert!(is_title_case("The Complete Guide Here"));
        assert!(!is_title_case("Two Words"));
        assert!(!is_title_case("a plain lowercase heading"));
    }

    #[test]
    fn emoji_detection_covers_common_blocks() {
        assert!(is_emoji('🚀'));
        assert!(is_emoji('✨'));
        assert!(!is_emoji('a'));
    }
}
