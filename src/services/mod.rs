//! Services
//!
//! Business logic for the drafting engine: interview handling, draft
//! generation, quality checking, prompt construction, and usage logging.
//! Services are called by the route layer and depend on `storage` plus the
//! foundation crates.

pub mod generation;
pub mod interview;
pub mod prompts;
pub mod quality;
pub mod usage;

pub use generation::{ContextSource, DraftGenerator, DynamicInterviewSource, StaticInterviewSource};
pub use interview::InterviewService;
pub use quality::QualityService;
pub use usage::UsageLogger;
