//! Draft Generation Orchestrator
//!
//! Produces a complete draft (six specification sections plus claims) for a
//! project and marks its interview completed. The static and dynamic
//! interview pipelines share one generator, parameterized by a
//! context-construction strategy.
//!
//! The two model calls are strictly sequential: concurrent requests trip
//! provider rate limits, and usage-log ordering stays meaningful for audit.
//! Nothing is persisted until both responses are in hand and the sections
//! response has parsed; any failure before that leaves the project untouched
//! and its interview-completed flag false.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use draftsmith_core::{InventionContext, QaTriple, SectionKey};
use draftsmith_llm::{extract_json, GenerationRequest, LlmProvider};

use crate::models::{DraftSection, GeneratedDraft};
use crate::services::prompts;
use crate::services::usage::UsageLogger;
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Sampling temperature for drafting calls
const DRAFT_TEMPERATURE: f32 = 0.7;

/// Strategy for loading a project's interview data and building the
/// invention context fed to the prompts.
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Load the interview data for a project and build its context.
    ///
    /// Fails with a user-facing validation error when the project has no
    /// usable interview data yet.
    async fn load(&self, project_id: &str) -> AppResult<InventionContext>;
}

/// Context source over the static questionnaire's flat answer map
pub struct StaticInterviewSource {
    db: Database,
}

impl StaticInterviewSource {
    /// Create a source over the shared database
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContextSource for StaticInterviewSource {
    async fn load(&self, project_id: &str) -> AppResult<InventionContext> {
        let answers = self.db.get_static_answers(project_id)?;
        if answers.is_empty() {
            return Err(AppError::validation(
                "No interview answers found for this project",
            ));
        }
        Ok(InventionContext::from_static_answers(&answers))
    }
}

/// Context source over the dynamic interview's generated question set
pub struct DynamicInterviewSource {
    db: Database,
}

impl DynamicInterviewSource {
    /// Create a source over the shared database
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContextSource for DynamicInterviewSource {
    async fn load(&self, project_id: &str) -> AppResult<InventionContext> {
        let answered = self.db.get_answered_questions(project_id)?;
        if answered.is_empty() {
            return Err(AppError::validation(
                "No interview questions found for this project",
            ));
        }
        let triples: Vec<QaTriple> = answered
            .into_iter()
            .map(|q| QaTriple::new(q.category, q.question, q.answer))
            .collect();
        Ok(InventionContext::from_dynamic_answers(&triples))
    }
}

/// Generates and persists a complete draft for a project
pub struct DraftGenerator {
    db: Database,
    provider: Arc<dyn LlmProvider>,
    usage: UsageLogger,
}

impl DraftGenerator {
    /// Create a generator over the shared database and provider
    pub fn new(db: Database, provider: Arc<dyn LlmProvider>) -> Self {
        let usage = UsageLogger::new(db.clone());
        Self {
            db,
            provider,
            usage,
        }
    }

    /// Generate a full draft for the project.
    ///
    /// Returns the (key, content) pairs actually written, claims last.
    /// Callers reorder by [`SectionKey::ALL`] for display.
    pub async fn generate(
        &self,
        project_id: &str,
        source: &dyn ContextSource,
    ) -> AppResult<GeneratedDraft> {
        let context = source.load(project_id).await?;

        // Two sequential calls: sections first, then claims
        let sections_response = self
            .provider
            .generate(
                GenerationRequest::new(prompts::build_sections_user_prompt(context.as_str()))
                    .with_system(prompts::build_sections_system_prompt())
                    .with_temperature(DRAFT_TEMPERATURE),
            )
            .await
            .map_err(|e| AppError::command(format!("Section drafting call failed: {}", e)))?;
        self.usage.log(
            project_id,
            "draft_sections",
            &sections_response.model,
            &sections_response.usage,
        );

        let claims_response = self
            .provider
            .generate(
                GenerationRequest::new(prompts::build_claims_user_prompt(context.as_str()))
                    .with_system(prompts::build_claims_system_prompt())
                    .with_temperature(DRAFT_TEMPERATURE),
            )
            .await
            .map_err(|e| AppError::command(format!("Claims drafting call failed: {}", e)))?;
        self.usage.log(
            project_id,
            "draft_claims",
            &claims_response.model,
            &claims_response.usage,
        );

        let section_values = parse_sections(&sections_response.content)?;

        debug!(
            project_id,
            claims_len = claims_response.content.trim().len(),
            "draft responses parsed, persisting"
        );

        // Persist all seven records as one logical draft, claims last
        let mut written: Vec<(SectionKey, String)> = Vec::with_capacity(SectionKey::ALL.len());
        for (key, content) in section_values {
            self.db
                .upsert_section(&DraftSection::new(project_id, key, content.clone()))?;
            written.push((key, content));
        }
        let claims = claims_response.content.trim().to_string();
        self.db
            .upsert_section(&DraftSection::new(project_id, SectionKey::Claims, claims.clone()))?;
        written.push((SectionKey::Claims, claims));

        self.db.set_interview_completed(project_id, true)?;

        Ok(GeneratedDraft { sections: written })
    }
}

/// Parse the sections response into (key, content) pairs in canonical order.
///
/// Tolerates a top-level `"sections"` wrapper object. Missing keys become
/// empty strings; present values are trimmed. Anything that is not a JSON
/// object is a malformed-output error carrying a bounded excerpt of the raw
/// response.
fn parse_sections(raw: &str) -> AppResult<Vec<(SectionKey, String)>> {
    let malformed = || {
        AppError::parse(format!(
            "Drafting model returned malformed sections JSON; response excerpt: {}",
            draftsmith_llm::excerpt(raw)
        ))
    };

    let json_str = extract_json(raw).map_err(|_| malformed())?;
    let value: serde_json::Value = serde_json::from_str(&json_str).map_err(|_| malformed())?;

    let object = value.as_object().ok_or_else(malformed)?;
    let object = match object.get("sections").and_then(|v| v.as_object()) {
        Some(inner) => inner,
        None => object,
    };

    Ok(SectionKey::SPEC_SECTIONS
        .iter()
        .map(|key| {
            let content = object
                .get(key.as_str())
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            (*key, content)
        })
        .collect())
}
