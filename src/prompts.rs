//! Prompt construction for delegated rewrite actions.
//!
//! Prompt wording is policy, not algorithm: tests assert dispatch behavior,
//! never the text below.

use crate::improve::{Article, ImprovementType};

pub(crate) const SYSTEM_PROMPT: &str =
    "You are an experienced human editor. You rewrite web articles so they read \
     as if written by a knowledgeable person: specific, varied in rhythm, free of \
     filler phrases and formulaic structure. Preserve factual claims and markdown \
     structure unless instructed otherwise. Return only the requested text with \
     no commentary.";

/// Per-action editing instruction.
fn instruction(improvement: ImprovementType) -> &'static str {
    use ImprovementType::*;
    match improvement {
        HumanizeVocabulary => {
            "Replace overused AI-flavored vocabulary (delve, leverage, robust, \
             seamless, tapestry, furthermore, and similar) with plainer, more \
             specific wording. Keep the meaning of every sentence intact."
        }
        VarySentenceLength => {
            "Rework the prose so sentence lengths vary naturally: mix short \
             punchy sentences with longer ones. Do not add or remove claims."
        }
        RemovePuffery => {
            "Remove superlative puffery (amazing, incredible, world-class, \
             game-changing) and replace it with concrete, verifiable statements."
        }
        AddCitations => {
            "Where the text says things like 'studies show' or 'experts say', \
             either name a plausible specific source category or rephrase the \
             claim as the author's own observation. Do not invent named studies."
        }
        PersonalizeTone => {
            "Shift the voice toward a first-person practitioner: add 'I' and \
             'you' where natural, and one brief concrete aside drawn from the \
             article's own subject matter."
        }
        VaryTransitions => {
            "Reduce generic transitions (furthermore, moreover, additionally) \
             and vary how paragraphs open. Connect ideas through content, not \
             connective filler."
        }
        FixFormatting => {
            "Normalize the markdown: sentence-case headings, remove excessive \
             bold emphasis and emoji, and keep at most one list per section."
        }
        RestructureTemplate => {
            "Break the templated article shape: merge formulaic sections, \
             remove boilerplate callouts, and let section lengths differ. Keep \
             all substantive information."
        }
        AddFaqSection => {
            "Add a '## Frequently Asked Questions' section near the end with 4 \
             to 5 question-and-answer pairs grounded in the article's content. \
             Return the complete updated article."
        }
        AddTable => {
            "Produce one markdown table that summarizes comparable facts from \
             the article. Return only the table with a one-line lead-in \
             sentence, no other text."
        }
        AddLists => {
            "Produce one short markdown bulleted list capturing a sequence or \
             set of options described in the article's prose. Return only the \
             list with a one-line lead-in sentence."
        }
        AddH2Headings => {
            "Produce one new '## ' section (heading plus two short paragraphs) \
             covering an aspect of the topic the article mentions but does not \
             develop. Return only that section."
        }
        AddKeywordToH2 => {
            "These are the article's '## ' headings, one per line. Rewrite them \
             so the focus keyword appears naturally in at least two of them. \
             Return the same number of lines, in order, headings only."
        }
        AddKeywordToIntro => {
            "This is the opening of the article. Rework it so the focus keyword \
             appears within the first two sentences, reading naturally. Return \
             only the reworked opening."
        }
        RewriteTitle => {
            "Write one title for this article: specific, under 65 characters, \
             no colon-separated clickbait pattern. Return the title only."
        }
        RewriteMetaDescription => {
            "Write one meta description for this article: 140 to 160 \
             characters, active voice, states what the reader gets. Return the \
             description only."
        }
        // Rule-based; never reaches the generator.
        CleanArtifacts => "",
    }
}

/// Compose the user prompt for a delegated action. `payload` is the text the
/// action operates on: the full content, a heading list, or an intro span.
pub(crate) fn user_prompt(
    improvement: ImprovementType,
    article: &Article<'_>,
    payload: &str,
) -> String {
    let mut prompt = String::from(instruction(improvement));

    if !article.keyword.is_empty() {
        prompt.push_str(&format!("\n\nFocus keyword: {}", article.keyword));
    }
    match improvement {
        ImprovementType::RewriteTitle => {
            if !article.title.is_empty() {
                prompt.push_str(&format!("\n\nCurrent title: {}", article.title));
            }
        }
        ImprovementType::RewriteMetaDescription => {
            if !article.meta_description.is_empty() {
                prompt.push_str(&format!(
                    "\n\nCurrent meta description: {}",
                    article.meta_description
                ));
            }
        }
        _ => {}
    }

    prompt.push_str("\n\n---\n\n");
    prompt.push_str(payload);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_payload_and_keyword() {
        let article = Article {
            content: "Body text.",
            title: "Title",
            meta_description: "",
            keyword: "compost bins",
        };
        let prompt = user_prompt(ImprovementType::HumanizeVocabulary, &article, article.content);
        assert!(prompt.contains("Body text."));
        assert!(prompt.contains("compost bins"));
    }

    #[test]
    fn every_delegated_type_has_an_instruction() {
        for ty in ImprovementType::ALL {
            if *ty != ImprovementType::CleanArtifacts {
                assert!(!instruction(*ty).is_empty(), "missing instruction: {ty}");
            }
        }
    }
}
