//! Usage Logging
//!
//! Records token usage around each model call. Logging is best-effort by
//! contract: a storage failure here is logged and swallowed, and must never
//! abort the operation being logged.

use draftsmith_llm::TokenUsage;
use tracing::warn;

use crate::models::UsageRecord;
use crate::storage::Database;

/// Best-effort token-usage logger
#[derive(Clone)]
pub struct UsageLogger {
    db: Database,
}

impl UsageLogger {
    /// Create a logger over the shared database
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record one model call's usage. Never fails; storage errors are
    /// logged at warn level and dropped.
    pub fn log(&self, project_id: &str, operation: &str, model: &str, usage: &TokenUsage) {
        let record = UsageRecord::new(project_id, operation, model, usage);
        if let Err(e) = self.db.insert_usage_record(&record) {
            warn!(
                project_id,
                operation,
                error = %e,
                "failed to record token usage"
            );
        }
    }
}
