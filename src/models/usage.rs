//! Usage Models
//!
//! Token-usage records written around each model call. Consumed by external
//! rate limiting and reporting; never read back by the drafting core.

use chrono::Utc;
use draftsmith_llm::TokenUsage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One model call's token usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Unique record ID
    pub id: String,
    /// Owning project
    pub project_id: String,
    /// Operation tag (e.g. "draft_sections", "draft_claims", "quality_check")
    pub operation: String,
    /// Model identifier reported by the provider
    pub model: String,
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
    /// Created timestamp (ISO-8601)
    pub created_at: String,
}

impl UsageRecord {
    /// Create a record from one call's reported usage
    pub fn new(
        project_id: impl Into<String>,
        operation: impl Into<String>,
        model: impl Into<String>,
        usage: &TokenUsage,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            operation: operation.into(),
            model: model.into(),
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
