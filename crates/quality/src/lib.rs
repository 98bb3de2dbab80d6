//! Draftsmith Quality
//!
//! Pure heuristic checks over an assembled draft, plus the merge step that
//! combines AI-reported issues with heuristic ones. No I/O, no model calls;
//! everything here is deterministic and unit-testable in isolation.
//!
//! Rules run in a fixed order: completeness, thin detail, abstract length,
//! then antecedent basis over the claims. All rules are independent and may
//! fire together.

pub mod antecedent;
pub mod checker;
pub mod merge;

use std::collections::HashMap;

use draftsmith_core::{QualityIssue, SectionKey};

pub use antecedent::check_antecedent_basis;
pub use checker::run_heuristics;
pub use merge::merge_issues;

/// Run the full heuristic pass over a draft.
///
/// Section-level rules first, then the antecedent-basis scan over the claims
/// text when claims are present. Unknown keys in the map are ignored by
/// construction (the map is keyed by the fixed enumeration).
pub fn analyze(sections: &HashMap<SectionKey, String>) -> Vec<QualityIssue> {
    let mut issues = run_heuristics(sections);
    if let Some(claims) = sections.get(&SectionKey::Claims) {
        if !claims.trim().is_empty() {
            issues.extend(check_antecedent_basis(claims));
        }
    }
    issues
}
