//! LLM Provider Trait
//!
//! Defines the common interface every text-completion provider implements.

use async_trait::async_trait;

use super::types::{GenerationRequest, GenerationResponse, LlmError, LlmResult};

/// Trait that all LLM providers must implement.
///
/// The drafting services depend only on this trait; concrete providers
/// (and their retry behavior) stay behind it.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Run a single text completion.
    ///
    /// # Arguments
    /// * `request` - System prompt, user prompt, and temperature
    ///
    /// # Returns
    /// The completed text plus token usage and the model identifier.
    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse>;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
