//! Quality Issue Types
//!
//! Data structures for flagged defects in a draft. Issues carry a category,
//! a severity, a human-readable message, and an optional location pointer.
//! Issue sets are regenerated wholesale on each quality-check run; individual
//! issues are never tracked across runs.

use serde::{Deserialize, Serialize};

/// Severity of a quality issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueSeverity {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MED")]
    Med,
    #[serde(rename = "LOW")]
    Low,
}

impl IssueSeverity {
    /// Get the string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::High => "HIGH",
            IssueSeverity::Med => "MED",
            IssueSeverity::Low => "LOW",
        }
    }

    /// Parse from string; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "HIGH" => Some(IssueSeverity::High),
            "MED" => Some(IssueSeverity::Med),
            "LOW" => Some(IssueSeverity::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a quality issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    /// A required part of the draft is missing or lacks supporting detail
    #[serde(rename = "MISSING_SUPPORT")]
    MissingSupport,
    /// Language too vague or imprecise for a patent filing
    #[serde(rename = "VAGUE_TERM")]
    VagueTerm,
    /// A claim references "the X" without introducing "a/an X" first
    #[serde(rename = "ANTECEDENT_BASIS")]
    AntecedentBasis,
    /// The same element is named inconsistently across the draft
    #[serde(rename = "TERM_CONSISTENCY")]
    TermConsistency,
}

impl IssueType {
    /// Get the string form for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::MissingSupport => "MISSING_SUPPORT",
            IssueType::VagueTerm => "VAGUE_TERM",
            IssueType::AntecedentBasis => "ANTECEDENT_BASIS",
            IssueType::TermConsistency => "TERM_CONSISTENCY",
        }
    }

    /// Parse from string; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MISSING_SUPPORT" => Some(IssueType::MissingSupport),
            "VAGUE_TERM" => Some(IssueType::VagueTerm),
            "ANTECEDENT_BASIS" => Some(IssueType::AntecedentBasis),
            "TERM_CONSISTENCY" => Some(IssueType::TermConsistency),
            _ => None,
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A flagged defect in a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    /// Issue category
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Severity
    pub severity: IssueSeverity,
    /// Human-readable description of the defect
    pub message: String,
    /// Location pointer (a section key, a claim number, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl QualityIssue {
    /// Create a new issue without a location
    pub fn new(issue_type: IssueType, severity: IssueSeverity, message: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity,
            message: message.into(),
            location: None,
        }
    }

    /// Attach a location pointer
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
