//! Draft Sections
//!
//! The fixed enumeration of parts that make up a provisional patent draft.
//! The canonical order defined here governs display and document assembly
//! downstream and must be preserved.

use serde::{Deserialize, Serialize};

/// A named part of the patent specification.
///
/// Exactly one section of each kind exists per project. `Claims` is generated
/// as a separate plain-text document after the six specification sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKey {
    #[serde(rename = "TITLE")]
    Title,
    #[serde(rename = "BACKGROUND")]
    Background,
    #[serde(rename = "SUMMARY")]
    Summary,
    #[serde(rename = "DRAWINGS")]
    Drawings,
    #[serde(rename = "DETAILED_DESC")]
    DetailedDescription,
    #[serde(rename = "ABSTRACT")]
    Abstract,
    #[serde(rename = "CLAIMS")]
    Claims,
}

impl SectionKey {
    /// All section keys in canonical display order.
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Title,
        SectionKey::Background,
        SectionKey::Summary,
        SectionKey::Drawings,
        SectionKey::DetailedDescription,
        SectionKey::Abstract,
        SectionKey::Claims,
    ];

    /// The six specification sections (everything except `Claims`),
    /// in canonical order.
    pub const SPEC_SECTIONS: [SectionKey; 6] = [
        SectionKey::Title,
        SectionKey::Background,
        SectionKey::Summary,
        SectionKey::Drawings,
        SectionKey::DetailedDescription,
        SectionKey::Abstract,
    ];

    /// Get the string form for database storage and LLM output keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Title => "TITLE",
            SectionKey::Background => "BACKGROUND",
            SectionKey::Summary => "SUMMARY",
            SectionKey::Drawings => "DRAWINGS",
            SectionKey::DetailedDescription => "DETAILED_DESC",
            SectionKey::Abstract => "ABSTRACT",
            SectionKey::Claims => "CLAIMS",
        }
    }

    /// Parse from the storage string form. Unknown keys yield `None` and are
    /// ignored by callers.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TITLE" => Some(SectionKey::Title),
            "BACKGROUND" => Some(SectionKey::Background),
            "SUMMARY" => Some(SectionKey::Summary),
            "DRAWINGS" => Some(SectionKey::Drawings),
            "DETAILED_DESC" => Some(SectionKey::DetailedDescription),
            "ABSTRACT" => Some(SectionKey::Abstract),
            "CLAIMS" => Some(SectionKey::Claims),
            _ => None,
        }
    }

    /// Get the human-readable display label used in headings and
    /// quality-issue messages.
    pub fn display_label(&self) -> &'static str {
        match self {
            SectionKey::Title => "Title",
            SectionKey::Background => "Background",
            SectionKey::Summary => "Summary",
            SectionKey::Drawings => "Brief Description of the Drawings",
            SectionKey::DetailedDescription => "Detailed Description",
            SectionKey::Abstract => "Abstract",
            SectionKey::Claims => "Claims",
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        assert_eq!(SectionKey::ALL[0], SectionKey::Title);
        assert_eq!(SectionKey::ALL[6], SectionKey::Claims);
        assert_eq!(SectionKey::SPEC_SECTIONS.len(), 6);
        assert!(!SectionKey::SPEC_SECTIONS.contains(&SectionKey::Claims));
    }

    #[test]
    fn test_string_roundtrip() {
        for key in SectionKey::ALL {
            assert_eq!(SectionKey::parse(key.as_str()), Some(key));
        }
    }

    #[test]
    fn test_unknown_key_ignored() {
        assert_eq!(SectionKey::parse("APPENDIX"), None);
        assert_eq!(SectionKey::parse(""), None);
        assert_eq!(SectionKey::parse("title"), None);
    }

    #[test]
    fn test_serde_uses_storage_form() {
        let json = serde_json::to_string(&SectionKey::DetailedDescription).unwrap();
        assert_eq!(json, "\"DETAILED_DESC\"");
        let key: SectionKey = serde_json::from_str("\"CLAIMS\"").unwrap();
        assert_eq!(key, SectionKey::Claims);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(SectionKey::DetailedDescription.display_label(), "Detailed Description");
        assert_eq!(
            SectionKey::Drawings.display_label(),
            "Brief Description of the Drawings"
        );
    }
}
