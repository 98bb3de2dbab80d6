//! Interview Service
//!
//! Handles both interview pipelines. The static questionnaire is a fixed set
//! of named fields whose answers are upserted directly. The dynamic
//! questionnaire is generated per invention in two model calls: extract a
//! structured profile from the free-text description, then generate a
//! categorized question set from the profile. Parse failures surface with a
//! bounded excerpt and are not retried here.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use draftsmith_llm::{extract_json, GenerationRequest, LlmProvider};

use crate::models::{DynamicQuestion, InventionProfile};
use crate::services::prompts;
use crate::services::usage::UsageLogger;
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Sampling temperature for extraction and question generation
const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Manages interview answers and dynamic question-set generation
pub struct InterviewService {
    db: Database,
    provider: Arc<dyn LlmProvider>,
    usage: UsageLogger,
}

impl InterviewService {
    /// Create a service over the shared database and provider
    pub fn new(db: Database, provider: Arc<dyn LlmProvider>) -> Self {
        let usage = UsageLogger::new(db.clone());
        Self {
            db,
            provider,
            usage,
        }
    }

    /// Upsert a batch of static-questionnaire answers for a project.
    pub fn submit_static_answers(
        &self,
        project_id: &str,
        answers: &HashMap<String, String>,
    ) -> AppResult<()> {
        self.require_project(project_id)?;
        for (field, value) in answers {
            self.db.upsert_static_answer(project_id, field, value)?;
        }
        Ok(())
    }

    /// Record the answer to one dynamic question.
    pub fn submit_dynamic_answer(&self, question_id: &str, answer: &str) -> AppResult<()> {
        self.db.upsert_dynamic_answer(question_id, answer)
    }

    /// Generate a fresh dynamic question set for a project, replacing any
    /// prior set (and its answers).
    ///
    /// Two sequential model calls: profile extraction from the project's
    /// description, then question generation from the profile.
    pub async fn generate_question_set(&self, project_id: &str) -> AppResult<Vec<DynamicQuestion>> {
        let project = self.require_project(project_id)?;
        if project.description.trim().is_empty() {
            return Err(AppError::validation(
                "Project has no invention description to interview from",
            ));
        }

        let profile = self.extract_profile(project_id, &project.description).await?;
        debug!(project_id, title = %profile.title, "invention profile extracted");

        let raw_questions = self.generate_questions(project_id, &profile).await?;
        if raw_questions.is_empty() {
            return Err(AppError::parse(
                "Question generation returned an empty question list",
            ));
        }

        let questions: Vec<DynamicQuestion> = raw_questions
            .into_iter()
            .enumerate()
            .map(|(position, q)| {
                DynamicQuestion::new(project_id, q.category, q.question, position as i32)
            })
            .collect();

        self.db.replace_dynamic_questions(project_id, &questions)?;
        Ok(questions)
    }

    /// Extract a structured invention profile from the free-text description.
    async fn extract_profile(
        &self,
        project_id: &str,
        description: &str,
    ) -> AppResult<InventionProfile> {
        let response = self
            .provider
            .generate(
                GenerationRequest::new(prompts::build_extraction_user_prompt(description))
                    .with_system(prompts::build_extraction_system_prompt())
                    .with_temperature(ANALYSIS_TEMPERATURE),
            )
            .await
            .map_err(|e| AppError::command(format!("Profile extraction call failed: {}", e)))?;

        self.usage.log(
            project_id,
            "extract_profile",
            &response.model,
            &response.usage,
        );

        let malformed = |excerpt: String| {
            AppError::parse(format!(
                "Profile extraction returned malformed JSON; response excerpt: {}",
                excerpt
            ))
        };

        let json_str = extract_json(&response.content).map_err(|e| malformed(e.excerpt))?;
        serde_json::from_str(&json_str)
            .map_err(|_| malformed(draftsmith_llm::excerpt(&response.content)))
    }

    /// Generate the question list from an extracted profile.
    async fn generate_questions(
        &self,
        project_id: &str,
        profile: &InventionProfile,
    ) -> AppResult<Vec<RawQuestion>> {
        let response = self
            .provider
            .generate(
                GenerationRequest::new(prompts::build_question_user_prompt(profile))
                    .with_system(prompts::build_question_system_prompt())
                    .with_temperature(ANALYSIS_TEMPERATURE),
            )
            .await
            .map_err(|e| AppError::command(format!("Question generation call failed: {}", e)))?;

        self.usage.log(
            project_id,
            "generate_questions",
            &response.model,
            &response.usage,
        );

        let malformed = |excerpt: String| {
            AppError::parse(format!(
                "Question generation returned malformed JSON; response excerpt: {}",
                excerpt
            ))
        };

        let json_str = extract_json(&response.content).map_err(|e| malformed(e.excerpt))?;
        let questions: Vec<RawQuestion> = serde_json::from_str(&json_str)
            .map_err(|_| malformed(draftsmith_llm::excerpt(&response.content)))?;

        // Drop entries the model left blank rather than failing the set
        Ok(questions
            .into_iter()
            .filter(|q| !q.question.trim().is_empty())
            .collect())
    }

    fn require_project(&self, project_id: &str) -> AppResult<crate::models::Project> {
        self.db
            .get_project(project_id)?
            .ok_or_else(|| AppError::not_found(format!("Project not found: {}", project_id)))
    }
}

/// Wire shape of one generated question
#[derive(Debug, serde::Deserialize)]
struct RawQuestion {
    #[serde(default = "default_category")]
    category: String,
    #[serde(default)]
    question: String,
}

fn default_category() -> String {
    "General".to_string()
}
