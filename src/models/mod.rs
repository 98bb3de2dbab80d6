//! Models
//!
//! Persisted record shapes shared between storage and services.

pub mod draft;
pub mod interview;
pub mod project;
pub mod usage;

pub use draft::{DraftSection, GeneratedDraft};
pub use interview::{AnsweredQuestion, DynamicQuestion, InventionProfile};
pub use project::{InterviewMode, Project};
pub use usage::UsageRecord;
