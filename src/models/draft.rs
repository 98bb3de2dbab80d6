//! Draft Models
//!
//! Persisted draft sections and the in-memory result of one generation run.

use chrono::Utc;
use draftsmith_core::SectionKey;
use serde::{Deserialize, Serialize};

/// One persisted draft section. Exactly one row exists per
/// (project, section key); generation replaces content in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSection {
    /// Owning project
    pub project_id: String,
    /// Which part of the draft this is
    pub key: SectionKey,
    /// Section text
    pub content: String,
    /// Last updated timestamp (ISO-8601)
    pub updated_at: String,
}

impl DraftSection {
    /// Create a section with the current timestamp
    pub fn new(project_id: impl Into<String>, key: SectionKey, content: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            key,
            content: content.into(),
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// The result of one generation run: the (key, content) pairs actually
/// written, with CLAIMS last. Callers reorder by [`SectionKey::ALL`] for
/// display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDraft {
    /// Written sections in write order (six specification sections, then claims)
    pub sections: Vec<(SectionKey, String)>,
}

impl GeneratedDraft {
    /// Look up the content written for a section key
    pub fn content_for(&self, key: SectionKey) -> Option<&str> {
        self.sections
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| c.as_str())
    }

    /// The claims text
    pub fn claims(&self) -> Option<&str> {
        self.content_for(SectionKey::Claims)
    }
}
