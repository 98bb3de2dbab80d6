//! Section-Level Heuristics
//!
//! Deterministic checks over the draft's section map: required-section
//! completeness, detailed-description length, and abstract length. Each rule
//! is independent; output order follows rule evaluation order.

use std::collections::HashMap;

use draftsmith_core::{IssueSeverity, IssueType, QualityIssue, SectionKey};

/// Sections a filing-ready draft must contain.
const REQUIRED_SECTIONS: [SectionKey; 4] = [
    SectionKey::Background,
    SectionKey::DetailedDescription,
    SectionKey::Abstract,
    SectionKey::Claims,
];

/// Below this many characters the detailed description is flagged as thin.
const THIN_DETAIL_CHARS: usize = 500;

/// USPTO guidance caps the abstract at this many words.
const ABSTRACT_WORD_LIMIT: usize = 150;

/// Run the section-level heuristics.
///
/// A section that is absent from the map or blank counts as missing.
/// Rules fire in order: completeness, thin detail, abstract length.
pub fn run_heuristics(sections: &HashMap<SectionKey, String>) -> Vec<QualityIssue> {
    let mut issues = Vec::new();

    let present = |key: SectionKey| {
        sections
            .get(&key)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    };

    // Completeness
    for key in REQUIRED_SECTIONS {
        if !present(key) {
            issues.push(
                QualityIssue::new(
                    IssueType::MissingSupport,
                    IssueSeverity::High,
                    format!("Missing required section: {}", key.display_label()),
                )
                .with_location(key.as_str()),
            );
        }
    }

    // Thin detail
    if let Some(detail) = sections.get(&SectionKey::DetailedDescription) {
        let length = detail.chars().count();
        if length > 0 && length < THIN_DETAIL_CHARS {
            issues.push(
                QualityIssue::new(
                    IssueType::MissingSupport,
                    IssueSeverity::Med,
                    "Detailed description is very short; add more technical detail about how \
                     the invention is built and operated.",
                )
                .with_location(SectionKey::DetailedDescription.as_str()),
            );
        }
    }

    // Abstract length
    if let Some(abstract_text) = sections.get(&SectionKey::Abstract) {
        let words = abstract_text.split_whitespace().count();
        if words > ABSTRACT_WORD_LIMIT {
            issues.push(
                QualityIssue::new(
                    IssueType::VagueTerm,
                    IssueSeverity::Low,
                    format!(
                        "Abstract is {} words; it should not exceed {} words.",
                        words, ABSTRACT_WORD_LIMIT
                    ),
                )
                .with_location(SectionKey::Abstract.as_str()),
            );
        }
    }

    issues
}
