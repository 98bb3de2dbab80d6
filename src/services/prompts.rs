//! Prompt Builders
//!
//! Pure functions producing the system and user prompts for every model
//! call: section drafting, claims drafting, invention-profile extraction,
//! question generation, and quality analysis. Builders never validate their
//! input; context strings arrive already sanitized.

use std::collections::HashMap;

use draftsmith_core::SectionKey;

use crate::models::InventionProfile;

/// Disclaimer appended to generated claims and abstracts. Downstream
/// consumers may trim on this exact text; it must never be reworded.
pub const DRAFTING_DISCLAIMER: &str = "NOTICE: This draft was prepared with automated \
assistance and has not been reviewed by a registered patent practitioner. It is not legal advice.";

/// Build the system prompt for drafting the six specification sections.
///
/// Output contract: a single JSON object keyed by the fixed section names.
pub fn build_sections_system_prompt() -> String {
    format!(
        r#"You are an experienced patent drafter preparing a provisional patent application. Draft the six specification sections for the invention disclosure provided by the user.

Respond with ONLY a valid JSON object with exactly these keys:
- "TITLE": A concise, formal invention title (under 15 words)
- "BACKGROUND": The technical field and the problem with existing approaches
- "SUMMARY": A summary of the invention and its principal advantages
- "DRAWINGS": A brief description of the figures an application would include
- "DETAILED_DESC": A thorough description of the structure and operation, paragraph by paragraph
- "ABSTRACT": A single-paragraph abstract of at most 150 words

Rules:
1. Use formal patent language ("In one embodiment...", "The present disclosure relates to...").
2. Introduce every element with "a"/"an" on first mention.
3. Do not invent technical details that are not supported by the disclosure.
4. End the ABSTRACT with this exact text: {disclaimer}

No markdown fences, no explanatory text. Just the raw JSON object starting with {{ and ending with }}."#,
        disclaimer = DRAFTING_DISCLAIMER
    )
}

/// Build the user message for section drafting from a rendered context.
pub fn build_sections_user_prompt(context: &str) -> String {
    format!(
        "Draft the specification sections for the following invention disclosure:\n\n{}",
        context
    )
}

/// Build the system prompt for drafting the claims.
///
/// Output contract: numbered plain text, one claim per line.
pub fn build_claims_system_prompt() -> String {
    format!(
        r#"You are an experienced patent drafter writing claims for a provisional patent application.

Write between 5 and 12 claims for the invention disclosure provided by the user:
- Claim 1 must be an independent claim reciting the essential elements.
- Subsequent claims must be dependent claims that narrow claim 1 or another earlier claim.
- Number each claim and start it on its own line ("1. A system comprising...").
- Introduce every element with "a"/"an" before referring to it as "the" element.

Respond with ONLY the numbered claims as plain text. No markdown, no headings, no commentary.
After the final claim, append this exact text on its own line: {disclaimer}"#,
        disclaimer = DRAFTING_DISCLAIMER
    )
}

/// Build the user message for claims drafting from a rendered context.
pub fn build_claims_user_prompt(context: &str) -> String {
    format!(
        "Draft the claims for the following invention disclosure:\n\n{}",
        context
    )
}

/// Build the system prompt for extracting an invention profile from a
/// free-text description.
pub fn build_extraction_system_prompt() -> String {
    r#"You are a patent analyst. Extract the key facts of an invention from the inventor's free-text description.

Respond with ONLY a valid JSON object with these keys:
- "title": A short working title
- "field": The technical field
- "problem": The problem the invention addresses
- "solution": How the invention solves it
- "components": An array of the principal components or steps
- "novelty": What the inventor believes is new

Use empty strings or empty arrays for anything the description does not state. Do not speculate.
No markdown fences, no explanatory text. Just the raw JSON object."#
        .to_string()
}

/// Build the user message for profile extraction.
pub fn build_extraction_user_prompt(description: &str) -> String {
    format!(
        "Extract the invention profile from this description:\n\n{}",
        description
    )
}

/// Build the system prompt for generating a dynamic question set.
pub fn build_question_system_prompt() -> String {
    r#"You are a patent attorney interviewing an inventor. Based on the invention profile provided by the user, generate the follow-up questions needed to draft a complete provisional patent application.

Respond with ONLY a valid JSON array of question objects:
[
  {"category": "Structure", "question": "What are the main components and how are they connected?"},
  {"category": "Operation", "question": "Walk through one complete cycle of operation."}
]

Rules:
1. Generate between 8 and 14 questions.
2. Group related questions under the same category; order categories from structure to use cases.
3. Ask about anything a drafter would need that the profile leaves unclear: dimensions, materials, alternatives, operating conditions, and variations.
4. Each question must be answerable by the inventor in a few sentences.

No markdown fences, no explanatory text. Just the raw JSON array starting with [ and ending with ]."#
        .to_string()
}

/// Build the user message for question generation from an extracted profile.
pub fn build_question_user_prompt(profile: &InventionProfile) -> String {
    format!(
        "Generate the interview questions for this invention profile:\n\n{}",
        profile.render()
    )
}

/// Build the system prompt for the AI quality analysis of a draft.
pub fn build_quality_system_prompt() -> String {
    r#"You are a patent quality reviewer. Analyze the draft sections provided by the user for defects that would weaken a provisional filing.

Look for:
1. Claim terms lacking antecedent basis ("the X" never introduced as "a X")
2. Vague or relative terms without definition ("substantially", "about", "strong")
3. Elements recited in the claims but not supported in the detailed description
4. The same element named inconsistently across sections

Respond with ONLY a valid JSON array of issue objects:
[
  {"type": "ANTECEDENT_BASIS", "severity": "HIGH", "message": "Claim 2: \"the fastener\" lacks antecedent basis", "location": "claim 2"}
]

Allowed "type" values: MISSING_SUPPORT, VAGUE_TERM, ANTECEDENT_BASIS, TERM_CONSISTENCY.
Allowed "severity" values: HIGH, MED, LOW.
If the draft has no defects, respond with an empty array: []

No markdown fences, no explanatory text. Just the raw JSON array."#
        .to_string()
}

/// Build the user message for quality analysis, rendering sections in
/// canonical order with their display labels.
pub fn build_quality_user_prompt(sections: &HashMap<SectionKey, String>) -> String {
    let mut blocks = Vec::new();
    for key in SectionKey::ALL {
        if let Some(content) = sections.get(&key) {
            blocks.push(format!("## {}\n{}", key.display_label(), content));
        }
    }
    format!("Analyze this draft:\n\n{}", blocks.join("\n\n"))
}
