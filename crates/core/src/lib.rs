//! Draftsmith Core
//!
//! Foundational domain types for the Draftsmith workspace: the fixed patent
//! section enumeration, quality-issue types, and the invention context used
//! to build prompts. This crate has zero dependencies on application-level
//! code (database, LLM providers, etc.).
//!
//! ## Module Organization
//!
//! - `section` - The fixed draft-section enumeration (`SectionKey`)
//! - `issue` - Quality-issue types (`QualityIssue`, `IssueType`, `IssueSeverity`)
//! - `context` - Prompt-construction intermediate (`InventionContext`)
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde** - keeps build times minimal
//! 2. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod context;
pub mod issue;
pub mod section;

// ── Sections ───────────────────────────────────────────────────────────
pub use section::SectionKey;

// ── Quality Issues ─────────────────────────────────────────────────────
pub use issue::{IssueSeverity, IssueType, QualityIssue};

// ── Invention Context ──────────────────────────────────────────────────
pub use context::{InventionContext, QaTriple, STATIC_FIELDS};
