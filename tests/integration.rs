use slopscore::generator::{GenerateError, TextGenerator};
use slopscore::{analyze, Article, ImprovementField, ScoreBand};

/// 219 words of lived-in prose: varied sentence lengths, heavy pronoun use,
/// no generic transitions, nothing from the flagged vocabulary.
const HUMAN_PASSAGE: &str = "I spent last March rebuilding the fence along the north side of our property, \
     and the work taught me more about patience than any job I have held. \
     The posts came out first. \
     My neighbor lent me a post digger, and we traded stories over the rails while the concrete set. \
     You learn a lot about someone that way.\n\n\
     The old boards were cedar, gray from twenty winters, and I stacked them behind \
     the shed because I could not bring myself to burn them. \
     Some still smelled faintly of sap when the saw bit in. \
     We reused about a third. \
     My daughter painted the gate on a Saturday. \
     She picked a blue that looked wrong in the can and right on the wood, \
     which I suppose is how these things go.\n\n\
     Rain pushed the job into April. \
     I did not mind. \
     The break gave my back a rest, and it gave me time to order better hinges \
     than the ones I had planned to buy. \
     When the last board went up, my neighbor walked the line with me, tapping posts with his knuckle. \
     He found two he did not trust. \
     We reset them the same evening, working by the truck's headlights, and then \
     we stood in the dark drinking coffee and admiring a fence neither of us could see.";

/// 212 words of machine-flavored prose: five flagged words three times each,
/// uniform 14-15 word sentences, zero first or second person.
const AI_PASSAGE: &str = "Modern teams delve into workflow data to find the patterns that slow down delivery. \
     Analysts leverage those findings to build a robust picture of where the process breaks. \
     Furthermore, the reporting layer surfaces every bottleneck before the weekly planning meeting even begins. \
     Each department can delve deeper into the numbers without waiting on a central analytics queue. \
     Moreover, managers leverage the same dashboards to compare output across regions and product lines. \
     A robust audit trail keeps every change visible to the compliance office at all times. \
     Furthermore, scheduled exports deliver the figures straight into the finance system each quarter automatically. \
     Teams that delve into historical trends catch seasonal slowdowns long before the metrics dip. \
     Moreover, the forecasting module flags unusual spending the moment a threshold gets crossed anywhere. \
     Vendors leverage the open interface to ship connectors for most of the common platforms. \
     A robust permission model keeps contractors limited to the projects assigned to their accounts. \
     Furthermore, the archive keeps seven years of records available for any regulator who asks. \
     Moreover, nightly checks confirm that every record matches the totals from the source systems. \
     The training program walks new analysts through the reporting stack in about two weeks. \
     Quarterly reviews keep the whole rollout aligned with what the operations group actually needs.";

const FAQ_DOCUMENT: &str = "# The Garden Shed Build\n\n\
     We put up a small cedar shed last spring, and the questions from neighbors have not stopped since. \
     Most of them come down to cost, time, and whether a concrete pad is worth the extra weekend. \
     The honest answers follow, along with the mistakes that taught them.\n\n\
     ## Picking the Site\n\n\
     The flattest corner of the yard won. \
     We cleared the sod in an afternoon, leveled a gravel base over two more, and \
     let it settle for a week before the first wall went up. \
     A string level and a long plank did most of the checking.\n\n\
     ## FAQ\n\n\
     ### How long does the build take?\n\n\
     Three weekends covered ours, with one lost to rain and a hinge order that shipped late.\n\n\
     ### What does a shed this size cost?\n\n\
     Materials ran about nine hundred dollars, and the gravel base added another hundred and forty.\n\n\
     ### Does the base need concrete?\n\n\
     Gravel held up fine through a wet autumn, though a heavier shed would change that answer.\n\n\
     ### Which tools matter most?\n\n\
     A circular saw, a speed square, and a second pair of hands beat everything else we tried.\n\n\
     ### Is a permit required?\n\n\
     Our county skips permits under two hundred square feet, but the setback rules still applied.\n\n\
     ### Would we build it again?\n\n\
     Yes, though next time the door goes on the south wall where the path already runs.";

struct Scripted(&'static str);

impl TextGenerator for Scripted {
    fn generate(&self, _: &str, _: &str, _: u32, _: u64) -> Result<String, GenerateError> {
        Ok(self.0.to_string())
    }
}

struct Unreachable;

impl TextGenerator for Unreachable {
    fn generate(&self, _: &str, _: &str, _: u32, _: u64) -> Result<String, GenerateError> {
        panic!("generator must not be contacted");
    }
}

fn article(content: &str) -> Article<'_> {
    Article {
        content,
        title: "The Garden Shed Build",
        meta_description: "",
        keyword: "garden shed",
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[test]
fn short_text_short_circuits_with_zero_score() {
    let result = analyze("Far too short to judge.");
    assert_eq!(result.score, 0);
    for (name, layer) in result.breakdown.iter() {
        assert_eq!(layer.score, 0, "layer {name} should be zeroed");
        assert_eq!(
            layer.details.get("insufficient_content"),
            Some(&serde_json::json!(true)),
            "layer {name} should flag insufficient content"
        );
    }
}

#[test]
fn empty_input_is_insufficient_not_an_error() {
    let result = analyze("");
    assert_eq!(result.score, 0);
    assert_eq!(result.band, ScoreBand::Minimal);
}

#[test]
fn score_stays_within_bounds() {
    for content in [HUMAN_PASSAGE, AI_PASSAGE, FAQ_DOCUMENT, "short", ""] {
        let result = analyze(content);
        assert!(result.score <= 100, "score {} out of range", result.score);
    }
}

#[test]
fn analyze_is_idempotent() {
    assert_eq!(analyze(AI_PASSAGE), analyze(AI_PASSAGE));
    assert_eq!(analyze(HUMAN_PASSAGE), analyze(HUMAN_PASSAGE));
}

#[test]
fn layer_scores_never_exceed_their_max() {
    for content in [HUMAN_PASSAGE, AI_PASSAGE, FAQ_DOCUMENT] {
        let result = analyze(content);
        let mut max_total = 0;
        for (name, layer) in result.breakdown.iter() {
            assert!(layer.score <= layer.max, "layer {name} exceeded its max");
            max_total += layer.max;
        }
        assert_eq!(max_total, 105);
    }
}

#[test]
fn human_prose_lands_in_the_minimal_band() {
    let result = analyze(HUMAN_PASSAGE);
    assert!(
        result.score <= 25,
        "human passage should score minimal, got {} ({:?})",
        result.score,
        result.breakdown
    );
    assert_eq!(result.band, ScoreBand::Minimal);
}

#[test]
fn machine_flavored_prose_scores_materially_higher() {
    let human = analyze(HUMAN_PASSAGE);
    let machine = analyze(AI_PASSAGE);

    assert!(machine.breakdown.vocabulary_patterns.score >= 15);
    assert!(machine.breakdown.coherence.score >= 3);
    assert!(machine.breakdown.stylometric.score >= 2);
    assert!(
        machine.score > human.score,
        "machine {} should beat human {}",
        machine.score,
        human.score
    );
    assert!(
        matches!(machine.band, ScoreBand::Moderate | ScoreBand::High),
        "expected moderate or high, got {:?} at {}",
        machine.band,
        machine.score
    );
}

#[test]
fn ai_disclaimer_trips_technical_artifacts() {
    let content = format!(
        "{HUMAN_PASSAGE}\n\nAs an AI language model, I don't have access to real-time pricing data."
    );
    let result = analyze(&content);
    assert!(result.breakdown.technical_artifacts.score >= 5);
}

#[test]
fn faq_section_with_six_questions_scores_the_faq_subcheck() {
    let result = analyze(FAQ_DOCUMENT);
    assert_eq!(
        result.breakdown.template_patterns.details["faq_question_count"],
        serde_json::json!(6)
    );
    assert!(result.breakdown.template_patterns.score >= 3);
}

#[test]
fn corroborating_layers_raise_confidence() {
    let result = analyze(AI_PASSAGE);
    let corroborating = result
        .breakdown
        .iter()
        .iter()
        .take(9)
        .filter(|(_, layer)| layer.ratio() >= 0.5)
        .count();
    assert!(corroborating >= 3, "fixture should corroborate, got {corroborating}");
    assert_eq!(result.breakdown.confidence.score, 3);
}

#[test]
fn json_output_exposes_all_ten_layers() {
    let json = serde_json::to_string_pretty(&analyze(AI_PASSAGE)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("score").is_some());
    assert!(parsed.get("band").is_some());
    let breakdown = parsed.get("breakdown").unwrap().as_object().unwrap();
    for key in [
        "technical_artifacts",
        "vocabulary_patterns",
        "structural_analysis",
        "content_patterns",
        "citation_verification",
        "formatting_analysis",
        "stylometric",
        "coherence",
        "template_patterns",
        "confidence",
    ] {
        let layer = breakdown.get(key).unwrap_or_else(|| panic!("missing layer {key}"));
        assert!(layer.get("score").is_some());
        assert!(layer.get("max").is_some());
        assert!(layer.get("details").is_some());
    }
}

// ---------------------------------------------------------------------------
// Improvement dispatch
// ---------------------------------------------------------------------------

#[test]
fn clean_artifacts_never_contacts_the_generator() {
    let content = "Solid opening paragraph.【3:1†report】 More prose follows here.\n\n\
                   Read https://example.com/page?utm_source=chatgpt.com for background.";
    let result =
        slopscore::dispatch_improvement(&article(content), "clean_artifacts", &Unreachable).unwrap();

    assert_eq!(result.field, ImprovementField::Content);
    assert!(!result.value.contains("【3:1†report】"));
    assert!(!result.value.contains("utm_source"));
    assert!(result.value.contains("Solid opening paragraph."));
}

#[test]
fn unrecognized_type_fails_without_generator_contact() {
    let err = slopscore::dispatch_improvement(&article("body"), "sprinkle_typos", &Unreachable)
        .unwrap_err();
    assert!(matches!(err, slopscore::ImproveError::UnknownType(_)));
}

#[test]
fn delegated_rewrite_returns_generator_output() {
    let gen = Scripted("The whole article, rewritten.");
    let result = slopscore::dispatch_improvement(&article(AI_PASSAGE), "humanize_vocabulary", &gen)
        .unwrap();
    assert_eq!(result.field, ImprovementField::Content);
    assert_eq!(result.value, "The whole article, rewritten.");
}

#[test]
fn batch_collects_failures_without_aborting() {
    struct FlakyByPrompt;
    impl TextGenerator for FlakyByPrompt {
        fn generate(&self, _: &str, prompt: &str, _: u32, _: u64) -> Result<String, GenerateError> {
            if prompt.contains("puffery") {
                Err(GenerateError::Api {
                    status: 429,
                    message: "rate limited".into(),
                })
            } else {
                Ok("rewritten".into())
            }
        }
    }

    use slopscore::ImprovementType::*;
    let outcomes = slopscore::run_improvements(
        &article(AI_PASSAGE),
        &[RemovePuffery, CleanArtifacts, VarySentenceLength],
        &FlakyByPrompt,
    );
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].1.is_err());
    assert!(outcomes[1].1.is_ok());
    assert!(outcomes[2].1.is_ok());
}
