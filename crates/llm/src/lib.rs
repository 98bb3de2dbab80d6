//! Draftsmith LLM
//!
//! Text-completion provider abstraction for the drafting engine, plus the
//! OpenAI-compatible HTTP implementation and the best-effort JSON extraction
//! utility used on model output.
//!
//! The drafting core treats the provider as a black box: one request in, one
//! response with token usage out. Rate-limit retry-with-backoff lives here at
//! the adapter boundary; callers above this crate never retry.

pub mod http_client;
pub mod json;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use json::{excerpt, extract_json, JsonExtractError};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::LlmProvider;
pub use types::{GenerationRequest, GenerationResponse, LlmError, LlmResult, TokenUsage};
