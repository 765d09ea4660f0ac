//! Heuristic scoring of prose for AI-generated stylistic fingerprints.
//!
//! [`analyze`] converts article text into a normalized 0–100 AI-likelihood
//! score plus a per-layer breakdown. The [`improve`] module maps improvement
//! tags to rewrite actions, delegating generation to an injected
//! [`generator::TextGenerator`].

use serde::Serialize;
use serde_json::{json, Map, Value};

mod layers;
mod patterns;
mod text;

pub mod generator;
pub mod improve;
mod prompts;

pub use improve::{
    clean_artifacts, dispatch, dispatch_improvement, run_improvements, Article, ImproveError,
    ImprovementField, ImprovementResult, ImprovementType,
};
pub use text::AnalyzedText;

/// Texts below this word count carry too little signal to score.
pub const MIN_SCORABLE_WORDS: usize = 200;

const CONFIDENCE_MAX: u32 = 5;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// One layer's verdict. `details` is diagnostic payload for display and
/// debugging; nothing downstream scores off it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerResult {
    pub score: u32,
    pub max: u32,
    pub details: Map<String, Value>,
}

impl LayerResult {
    pub(crate) fn new(score: u32, max: u32, details: Map<String, Value>) -> Self {
        debug_assert!(max > 0);
        Self {
            score: score.min(max),
            max,
            details,
        }
    }

    fn insufficient(max: u32) -> Self {
        let mut details = Map::new();
        details.insert("insufficient_content".into(), json!(true));
        Self {
            score: 0,
            max,
            details,
        }
    }

    /// Fraction of this layer's maximum that was scored.
    pub fn ratio(&self) -> f64 {
        self.score as f64 / self.max as f64
    }
}

/// All ten layers, in display order. A struct rather than a map so the
/// ten-keys invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub technical_artifacts: LayerResult,
    pub vocabulary_patterns: LayerResult,
    pub structural_analysis: LayerResult,
    pub content_patterns: LayerResult,
    pub citation_verification: LayerResult,
    pub formatting_analysis: LayerResult,
    pub stylometric: LayerResult,
    pub coherence: LayerResult,
    pub template_patterns: LayerResult,
    pub confidence: LayerResult,
}

impl ScoreBreakdown {
    fn compute(text: &AnalyzedText) -> Self {
        let technical_artifacts = layers::technical_artifacts(text);
        let vocabulary_patterns = layers::vocabulary_patterns(text);
        let structural_analysis = layers::structural_analysis(text);
        let content_patterns = layers::content_patterns(text);
        let citation_verification = layers::citation_verification(text);
        let formatting_analysis = layers::formatting_analysis(text);
        let stylometric = layers::stylometric(text);
        let coherence = layers::coherence(text);
        let template_patterns = layers::template_patterns(text);

        let confidence = confidence_adjustment([
            ("technical_artifacts", &technical_artifacts),
            ("vocabulary_patterns", &vocabulary_patterns),
            ("structural_analysis", &structural_analysis),
            ("content_patterns", &content_patterns),
            ("citation_verification", &citation_verification),
            ("formatting_analysis", &formatting_analysis),
            ("stylometric", &stylometric),
            ("coherence", &coherence),
            ("template_patterns", &template_patterns),
        ]);

        Self {
            technical_artifacts,
            vocabulary_patterns,
            structural_analysis,
            content_patterns,
            citation_verification,
            formatting_analysis,
            stylometric,
            coherence,
            template_patterns,
            confidence,
        }
    }

    fn insufficient() -> Self {
        Self {
            technical_artifacts: LayerResult::insufficient(layers::TECHNICAL_ARTIFACTS_MAX),
            vocabulary_patterns: LayerResult::insufficient(layers::VOCABULARY_MAX),
            structural_analysis: LayerResult::insufficient(layers::STRUCTURAL_MAX),
            content_patterns: LayerResult::insufficient(layers::CONTENT_MAX),
            citation_verification: LayerResult::insufficient(layers::CITATION_MAX),
            formatting_analysis: LayerResult::insufficient(layers::FORMATTING_MAX),
            stylometric: LayerResult::insufficient(layers::STYLOMETRIC_MAX),
            coherence: LayerResult::insufficient(layers::COHERENCE_MAX),
            template_patterns: LayerResult::insufficient(layers::TEMPLATE_MAX),
            confidence: LayerResult::insufficient(CONFIDENCE_MAX),
        }
    }

    /// Layers paired with their names, in stable display order.
    pub fn iter(&self) -> [(&'static str, &LayerResult); 10] {
        [
            ("technical_artifacts", &self.technical_artifacts),
            ("vocabulary_patterns", &self.vocabulary_patterns),
            ("structural_analysis", &self.structural_analysis),
            ("content_patterns", &self.content_patterns),
            ("citation_verification", &self.citation_verification),
            ("formatting_analysis", &self.formatting_analysis),
            ("stylometric", &self.stylometric),
            ("coherence", &self.coherence),
            ("template_patterns", &self.template_patterns),
            ("confidence", &self.confidence),
        ]
    }
}

/// Display band for a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Minimal,
    Moderate,
    High,
    Severe,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            0..=25 => ScoreBand::Minimal,
            26..=50 => ScoreBand::Moderate,
            51..=75 => ScoreBand::High,
            _ => ScoreBand::Severe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlopScore {
    pub score: u32,
    pub band: ScoreBand,
    pub breakdown: ScoreBreakdown,
}

// ---------------------------------------------------------------------------
// Confidence adjustment
// ---------------------------------------------------------------------------

/// A single strong layer is noise; several independent layers agreeing is
/// signal. Counts layers at or above half their maximum.
fn confidence_adjustment(layer_results: [(&'static str, &LayerResult); 9]) -> LayerResult {
    let corroborating: Vec<&'static str> = layer_results
        .iter()
        .filter(|(_, r)| r.ratio() >= 0.5)
        .map(|(name, _)| *name)
        .collect();

    let score = match corroborating.len() {
        n if n >= 5 => 5,
        n if n >= 3 => 3,
        _ => 0,
    };

    let mut details = Map::new();
    details.insert("corroborating_count".into(), json!(corroborating.len()));
    details.insert("corroborating_layers".into(), json!(corroborating));
    LayerResult::new(score, CONFIDENCE_MAX, details)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score one article body. Pure: same input, same output, no shared state.
pub fn analyze(content: &str) -> SlopScore {
    let text = AnalyzedText::new(content);

    if text.word_count() < MIN_SCORABLE_WORDS {
        return SlopScore {
            score: 0,
            band: ScoreBand::Minimal,
            breakdown: ScoreBreakdown::insufficient(),
        };
    }

    let breakdown = ScoreBreakdown::compute(&text);
    let raw_total: u32 = breakdown.iter().iter().map(|(_, r)| r.score).sum();
    let raw_max: u32 = breakdown.iter().iter().map(|(_, r)| r.max).sum();
    let score = ((raw_total as f64 / raw_max as f64) * 100.0).round() as u32;
    let score = score.min(100);

    SlopScore {
        score,
        band: ScoreBand::for_score(score),
        breakdown,
    }
}
