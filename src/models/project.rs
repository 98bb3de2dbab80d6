//! Project Model
//!
//! A project is one invention disclosure being drafted, anchored to either
//! the static or the dynamic interview pipeline.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which interview pipeline feeds a project's draft generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    /// The fixed questionnaire with known field names
    Static,
    /// An AI-generated, per-invention question set
    Dynamic,
}

impl InterviewMode {
    /// Get the string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewMode::Static => "static",
            InterviewMode::Dynamic => "dynamic",
        }
    }

    /// Parse from string, defaulting to static for unknown values
    pub fn parse(s: &str) -> Self {
        match s {
            "dynamic" => InterviewMode::Dynamic,
            _ => InterviewMode::Static,
        }
    }
}

impl std::fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A drafting project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID
    pub id: String,
    /// Working title of the invention
    pub title: String,
    /// Free-text invention description provided at creation
    pub description: String,
    /// Which interview pipeline this project uses
    pub interview_mode: InterviewMode,
    /// Set true only after a full draft has been generated and persisted
    pub interview_completed: bool,
    /// Created timestamp (ISO-8601)
    pub created_at: String,
    /// Last updated timestamp (ISO-8601)
    pub updated_at: String,
}

impl Project {
    /// Create a new project with a generated ID and current timestamps
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        interview_mode: InterviewMode,
    ) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            interview_mode,
            interview_completed: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_mode_roundtrip() {
        assert_eq!(InterviewMode::parse("static"), InterviewMode::Static);
        assert_eq!(InterviewMode::parse("dynamic"), InterviewMode::Dynamic);
        assert_eq!(InterviewMode::parse("garbage"), InterviewMode::Static);
    }

    #[test]
    fn test_new_project() {
        let project = Project::new("Valve", "A self-sealing valve", InterviewMode::Dynamic);
        assert!(!project.id.is_empty());
        assert!(!project.interview_completed);
        assert_eq!(project.interview_mode, InterviewMode::Dynamic);
    }
}
