//! Interview Models
//!
//! Persisted records for the dynamic interview (generated question sets with
//! per-question answers) and the AI-extracted invention profile used to seed
//! question generation. Static-questionnaire answers are a plain
//! (field, value) map and need no record type of their own.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One AI-generated question of a dynamic interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicQuestion {
    /// Unique question ID
    pub id: String,
    /// Owning project
    pub project_id: String,
    /// Topic category the question was generated under
    pub category: String,
    /// The question text
    pub question: String,
    /// Position within the question set (0-based)
    pub position: i32,
}

impl DynamicQuestion {
    /// Create a question with a generated ID
    pub fn new(
        project_id: impl Into<String>,
        category: impl Into<String>,
        question: impl Into<String>,
        position: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            category: category.into(),
            question: question.into(),
            position,
        }
    }
}

/// A dynamic question joined with its answer, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    /// Topic category
    pub category: String,
    /// The question text
    pub question: String,
    /// The inventor's answer, if one was given
    pub answer: Option<String>,
}

/// Structured invention details extracted by the model from the free-text
/// description. Used only to seed dynamic question generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventionProfile {
    /// Working title
    #[serde(default)]
    pub title: String,
    /// Technical field
    #[serde(default)]
    pub field: String,
    /// The problem the invention addresses
    #[serde(default)]
    pub problem: String,
    /// How the invention solves it
    #[serde(default)]
    pub solution: String,
    /// Principal components or steps
    #[serde(default)]
    pub components: Vec<String>,
    /// What is believed to be new
    #[serde(default)]
    pub novelty: String,
}

impl InventionProfile {
    /// Render the profile as a compact text block for prompt interpolation
    pub fn render(&self) -> String {
        format!(
            "Title: {}\nField: {}\nProblem: {}\nSolution: {}\nComponents: {}\nNovelty: {}",
            self.title,
            self.field,
            self.problem,
            self.solution,
            self.components.join("; "),
            self.novelty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_question_ids_are_unique() {
        let a = DynamicQuestion::new("p1", "Structure", "What parts?", 0);
        let b = DynamicQuestion::new("p1", "Structure", "What parts?", 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_profile_parses_with_missing_fields() {
        let profile: InventionProfile =
            serde_json::from_str(r#"{"title": "Valve", "novelty": "Self-sealing"}"#).unwrap();
        assert_eq!(profile.title, "Valve");
        assert!(profile.problem.is_empty());
        assert!(profile.components.is_empty());
    }

    #[test]
    fn test_profile_render() {
        let profile = InventionProfile {
            title: "Valve".to_string(),
            components: vec!["body".to_string(), "seal".to_string()],
            ..Default::default()
        };
        let text = profile.render();
        assert!(text.contains("Title: Valve"));
        assert!(text.contains("Components: body; seal"));
    }
}
