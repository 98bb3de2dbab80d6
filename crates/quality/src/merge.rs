//! Issue Merging
//!
//! Combines the AI-reported issue list (best-effort, possibly empty) with
//! the heuristic list, dropping exact-duplicate messages. The merged list
//! wholesale-replaces a project's persisted issues.

use std::collections::HashSet;

use draftsmith_core::QualityIssue;

/// Merge AI issues with heuristic issues.
///
/// AI issues come first, then heuristic issues. An issue whose message
/// exactly matches an earlier kept one (case-sensitive) is dropped; the
/// first occurrence wins.
pub fn merge_issues(ai: Vec<QualityIssue>, heuristic: Vec<QualityIssue>) -> Vec<QualityIssue> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(ai.len() + heuristic.len());

    for issue in ai.into_iter().chain(heuristic) {
        if seen.insert(issue.message.clone()) {
            merged.push(issue);
        }
    }

    merged
}
