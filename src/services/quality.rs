//! Quality Check Service
//!
//! Runs the heuristic rules over a project's persisted draft, asks the model
//! for an additional review, merges the two issue lists, and replaces the
//! project's stored issues with the result.
//!
//! The model review is best-effort: a failed call or unparseable response is
//! logged and treated as an empty list, and the heuristic results are
//! persisted on their own.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use draftsmith_core::{IssueSeverity, IssueType, QualityIssue, SectionKey};
use draftsmith_llm::{extract_json, GenerationRequest, LlmProvider};
use draftsmith_quality::{analyze, merge_issues};

use crate::services::prompts;
use crate::services::usage::UsageLogger;
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Sampling temperature for the analysis call
const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Runs quality checks over a project's draft
pub struct QualityService {
    db: Database,
    provider: Arc<dyn LlmProvider>,
    usage: UsageLogger,
}

impl QualityService {
    /// Create a service over the shared database and provider
    pub fn new(db: Database, provider: Arc<dyn LlmProvider>) -> Self {
        let usage = UsageLogger::new(db.clone());
        Self {
            db,
            provider,
            usage,
        }
    }

    /// Run a full quality check and replace the project's stored issues.
    ///
    /// Returns the merged issue list that was persisted.
    pub async fn run_check(&self, project_id: &str) -> AppResult<Vec<QualityIssue>> {
        let sections = self.db.get_section_map(project_id)?;
        if sections.is_empty() {
            return Err(AppError::validation(
                "No draft to check; generate a draft first",
            ));
        }

        let heuristic = analyze(&sections);

        let ai = match self.request_ai_issues(project_id, &sections).await {
            Ok(issues) => issues,
            Err(e) => {
                warn!(
                    project_id,
                    error = %e,
                    "AI quality review failed, continuing with heuristic results only"
                );
                Vec::new()
            }
        };

        debug!(
            project_id,
            ai_count = ai.len(),
            heuristic_count = heuristic.len(),
            "merging quality issues"
        );

        let merged = merge_issues(ai, heuristic);
        self.db.replace_issues(project_id, &merged)?;
        Ok(merged)
    }

    /// Ask the model to review the draft. Errors here are the caller's to
    /// swallow; this method itself never persists anything.
    async fn request_ai_issues(
        &self,
        project_id: &str,
        sections: &HashMap<SectionKey, String>,
    ) -> AppResult<Vec<QualityIssue>> {
        let response = self
            .provider
            .generate(
                GenerationRequest::new(prompts::build_quality_user_prompt(sections))
                    .with_system(prompts::build_quality_system_prompt())
                    .with_temperature(ANALYSIS_TEMPERATURE),
            )
            .await
            .map_err(|e| AppError::command(format!("Quality review call failed: {}", e)))?;

        self.usage.log(
            project_id,
            "quality_check",
            &response.model,
            &response.usage,
        );

        let json_str = extract_json(&response.content).map_err(|e| {
            AppError::parse(format!(
                "Quality review returned no JSON; response excerpt: {}",
                e.excerpt
            ))
        })?;
        let raw: Vec<RawAiIssue> = serde_json::from_str(&json_str)?;

        // Issues with unrecognized type or severity strings are skipped
        Ok(raw.into_iter().filter_map(RawAiIssue::into_issue).collect())
    }
}

/// Wire shape of one model-reported issue, tolerant of missing fields
#[derive(Debug, serde::Deserialize)]
struct RawAiIssue {
    #[serde(rename = "type", default)]
    issue_type: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    location: Option<String>,
}

impl RawAiIssue {
    fn into_issue(self) -> Option<QualityIssue> {
        if self.message.is_empty() {
            return None;
        }
        let issue_type = IssueType::parse(&self.issue_type)?;
        let severity = IssueSeverity::parse(&self.severity)?;
        Some(QualityIssue {
            issue_type,
            severity,
            message: self.message,
            location: self.location,
        })
    }
}
