//! Antecedent-Basis Heuristic
//!
//! Patent claims must introduce an element with "a"/"an" before referring to
//! it as "the element". This rule scans each claim line for "the <phrase>"
//! references that lack such an introduction earlier in the same line.
//!
//! The phrase capture is a natural-language approximation, not a grammar:
//! false positives and negatives are expected and acceptable. The rule is
//! kept isolated here so its stoplist and capture behavior stay directly
//! unit-testable.

use regex::Regex;

use draftsmith_core::{IssueSeverity, IssueType, QualityIssue};

/// Generic nouns that never need an explicit antecedent.
const STOPLIST: [&str; 6] = ["claim", "invention", "device", "method", "system", "present"];

/// Maximum number of words in a captured noun phrase.
const MAX_PHRASE_WORDS: usize = 3;

/// Scan claims text for antecedent-basis violations.
///
/// A line is treated as a claim only if it starts with `<digits>.`. Within a
/// claim line, each "the <1-3 word phrase>" occurrence is checked for a prior
/// "a <phrase>"/"an <phrase>" in the same line (case-insensitive). The first
/// violation in a line produces one HIGH issue; the rest of the line is
/// skipped.
pub fn check_antecedent_basis(claims_text: &str) -> Vec<QualityIssue> {
    let claim_line = Regex::new(r"^\s*(\d+)\.").unwrap();
    let the_marker = Regex::new(r"(?i)\bthe\b").unwrap();

    let mut issues = Vec::new();

    for line in claims_text.lines() {
        let claim_number = match claim_line.captures(line) {
            Some(caps) => caps[1].to_string(),
            None => continue,
        };

        for marker in the_marker.find_iter(line) {
            let rest = &line[marker.end()..];
            let phrase = match capture_phrase(rest) {
                Some(p) => p,
                None => continue,
            };

            if phrase
                .split_whitespace()
                .any(|w| STOPLIST.contains(&w.to_lowercase().as_str()))
            {
                continue;
            }

            if has_introduction(line, &phrase) {
                continue;
            }

            issues.push(
                QualityIssue::new(
                    IssueType::AntecedentBasis,
                    IssueSeverity::High,
                    format!(
                        "Claim {}: \"the {}\" lacks antecedent basis; introduce \"a {}\" or \
                         \"an {}\" earlier in the claim.",
                        claim_number, phrase, phrase, phrase
                    ),
                )
                .with_location(format!("claim {}", claim_number)),
            );
            break;
        }
    }

    issues
}

/// Capture the noun phrase following a "the" marker.
///
/// Words accumulate until a terminator: punctuation, "of"/"in", or end of
/// line. A run of more than [`MAX_PHRASE_WORDS`] words without a terminator
/// falls back to the head word alone.
fn capture_phrase(rest: &str) -> Option<String> {
    let mut words: Vec<&str> = Vec::new();
    let mut chars = rest.char_indices().peekable();

    while let Some(&(idx, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if !ch.is_ascii_alphabetic() {
            // Punctuation terminates the phrase
            break;
        }

        let start = idx;
        let mut end = idx;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_ascii_alphabetic() || c == '-' {
                end = i + c.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let word = &rest[start..end];

        if !words.is_empty() && (word.eq_ignore_ascii_case("of") || word.eq_ignore_ascii_case("in"))
        {
            return Some(words.join(" "));
        }

        if words.len() == MAX_PHRASE_WORDS {
            // No terminator within range: keep only the head word
            return Some(words[0].to_string());
        }

        words.push(word);
    }

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Whether the claim line already introduces the phrase with "a"/"an".
///
/// Any prefix of the phrase counts: "a widget" introduces both "widget" and
/// a captured compound like "widget sliding".
fn has_introduction(line: &str, phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    (1..=words.len()).any(|k| {
        let prefix = words[..k].join(" ");
        let pattern = format!(r"(?i)\ban?\s+{}\b", regex::escape(&prefix));
        Regex::new(&pattern).unwrap().is_match(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unintroduced_phrase_flagged() {
        let issues = check_antecedent_basis("1. The widget has a sensor.");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::High);
        assert_eq!(issues[0].issue_type, IssueType::AntecedentBasis);
        assert!(issues[0].message.contains("Claim 1"));
        assert!(issues[0].message.contains("\"the widget\""));
        assert_eq!(issues[0].location.as_deref(), Some("claim 1"));
    }

    #[test]
    fn test_introduced_phrase_passes() {
        let issues =
            check_antecedent_basis("2. The device comprising a widget and the widget is red.");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_an_introduction_passes() {
        let issues = check_antecedent_basis("1. A valve comprising an actuator, the actuator \
                                             being spring-loaded.");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_stoplist_words_skipped() {
        let issues = check_antecedent_basis(
            "3. The system of claim 1, wherein the method uses the present invention.",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_multi_word_phrase_terminated_by_of() {
        let issues = check_antecedent_basis("4. The lever arm of the housing rotates.");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("\"the lever arm\""));
    }

    #[test]
    fn test_one_issue_per_claim_line() {
        let issues = check_antecedent_basis("5. The bracket holds the fastener near the hinge.");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("\"the bracket\""));
    }

    #[test]
    fn test_multiple_claim_lines_in_order() {
        // The introduction check is per-line, so "The clamp of claim 1" in a
        // dependent claim is flagged even though claim 1 introduced the clamp.
        let claims = "1. A clamp comprising a jaw.\n\
                      2. The clamp of claim 1, wherein the jaw grips a workpiece.\n\
                      3. A fastener wherein the spindle engages its shaft.";
        let issues = check_antecedent_basis(claims);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("Claim 2"));
        assert!(issues[0].message.contains("\"the clamp\""));
        assert!(issues[1].message.contains("Claim 3"));
        assert!(issues[1].message.contains("\"the spindle\""));
    }

    #[test]
    fn test_non_claim_lines_ignored() {
        let issues = check_antecedent_basis("What is claimed is:\nThe widget does things.");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_case_insensitive_introduction() {
        let issues = check_antecedent_basis("1. A Widget mounted on a rail, the widget sliding.");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_capture_phrase_fallback_to_head_word() {
        assert_eq!(capture_phrase(" widget has a sensor."), Some("widget".to_string()));
    }

    #[test]
    fn test_capture_phrase_punctuation_terminator() {
        assert_eq!(capture_phrase(" housing, and"), Some("housing".to_string()));
        assert_eq!(capture_phrase(" flange."), Some("flange".to_string()));
    }

    #[test]
    fn test_capture_phrase_of_terminator() {
        assert_eq!(capture_phrase(" lever arm of claim 1"), Some("lever arm".to_string()));
    }

    #[test]
    fn test_capture_phrase_end_of_line() {
        assert_eq!(capture_phrase(" end cap"), Some("end cap".to_string()));
    }

    #[test]
    fn test_capture_phrase_nothing_captured() {
        assert_eq!(capture_phrase(" ("), None);
        assert_eq!(capture_phrase(""), None);
    }
}
