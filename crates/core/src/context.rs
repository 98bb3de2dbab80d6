//! Invention Context
//!
//! The prompt-construction intermediate built once per generation request.
//! A context is assembled either from the static interview's flat answer map
//! or from the dynamic interview's ordered question/answer triples, and is
//! rendered to a single deterministic string for prompt interpolation.
//!
//! Contexts are immutable and never persisted; they exist only between the
//! interview store and the prompt builders.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Field names of the static interview, in render order. Every field is
/// always present in the rendered context, empty when unanswered.
pub const STATIC_FIELDS: [&str; 8] = [
    "title",
    "problem",
    "solution",
    "components",
    "operation",
    "novelty",
    "advantages",
    "use_cases",
];

/// Placeholder rendered for dynamic questions the inventor skipped.
const NOT_ANSWERED: &str = "(not answered)";

/// Separator between dynamic-interview category blocks, so the model can
/// distinguish topic boundaries.
const CATEGORY_SEPARATOR: &str = "---";

/// A single dynamic-interview entry: the category it was generated under,
/// the question text, and the answer if one was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaTriple {
    /// Topic category the question belongs to
    pub category: String,
    /// The question text
    pub question: String,
    /// The inventor's answer, if any
    pub answer: Option<String>,
}

impl QaTriple {
    /// Create a new triple
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        answer: Option<String>,
    ) -> Self {
        Self {
            category: category.into(),
            question: question.into(),
            answer,
        }
    }
}

/// A rendered invention disclosure ready for prompt interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventionContext {
    text: String,
}

impl InventionContext {
    /// Build a context from the static interview's flat answer map.
    ///
    /// Every name in [`STATIC_FIELDS`] appears in the output in fixed order;
    /// provided values are trimmed, missing ones become the empty string.
    /// Rendered as a JSON-like block so the model sees one field per line.
    pub fn from_static_answers(answers: &HashMap<String, String>) -> Self {
        let mut lines = Vec::with_capacity(STATIC_FIELDS.len());
        for field in STATIC_FIELDS {
            let value = answers.get(field).map(|v| v.trim()).unwrap_or("");
            // serde_json::Value handles quoting and escaping of the value
            lines.push(format!(
                "  \"{}\": {}",
                field,
                serde_json::Value::String(value.to_string())
            ));
        }
        Self {
            text: format!("{{\n{}\n}}", lines.join(",\n")),
        }
    }

    /// Build a context from the dynamic interview's question/answer triples.
    ///
    /// Triples are grouped by category preserving first-seen category order;
    /// no pair is ever dropped. Within a category each pair renders as
    /// `Q:`/`A:` lines, with unanswered questions shown as "(not answered)".
    /// Category blocks are joined with a horizontal-rule separator.
    pub fn from_dynamic_answers(triples: &[QaTriple]) -> Self {
        let mut order: Vec<&str> = Vec::new();
        let mut grouped: HashMap<&str, Vec<&QaTriple>> = HashMap::new();

        for triple in triples {
            let category = triple.category.as_str();
            grouped
                .entry(category)
                .or_insert_with(|| {
                    order.push(category);
                    Vec::new()
                })
                .push(triple);
        }

        let blocks: Vec<String> = order
            .iter()
            .map(|category| {
                let pairs: Vec<String> = grouped[category]
                    .iter()
                    .map(|t| {
                        let answer = t
                            .answer
                            .as_deref()
                            .map(str::trim)
                            .filter(|a| !a.is_empty())
                            .unwrap_or(NOT_ANSWERED);
                        format!("Q: {}\nA: {}", t.question.trim(), answer)
                    })
                    .collect();
                format!("{}\n\n{}", category, pairs.join("\n\n"))
            })
            .collect();

        Self {
            text: blocks.join(&format!("\n\n{}\n\n", CATEGORY_SEPARATOR)),
        }
    }

    /// The rendered context string.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for InventionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
