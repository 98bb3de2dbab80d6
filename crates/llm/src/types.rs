//! LLM Types
//!
//! Core types for the single-completion provider contract.

use serde::{Deserialize, Serialize};

/// A single text-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Optional system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The user prompt
    pub prompt: String,
    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.7
}

impl GenerationRequest {
    /// Create a request with the default temperature and no system prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: default_temperature(),
        }
    }

    /// Set the system prompt
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Token usage reported for one completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
    /// Total tokens as reported by the provider
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Create a usage record, deriving the total
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Response from a text-completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Text content of the completion
    pub content: String,
    /// Token usage statistics
    pub usage: TokenUsage,
    /// The model that generated the response
    pub model: String,
}

/// Error types for LLM operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmError {
    /// Authentication failed (invalid API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited {
        message: String,
        retry_after: Option<u32>,
    },
    /// Model not found or not available
    ModelNotFound { model: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    NetworkError { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            LlmError::RateLimited { message, .. } => {
                write!(f, "Rate limited: {}", message)
            }
            LlmError::ModelNotFound { model } => {
                write!(f, "Model not found: {}", model)
            }
            LlmError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            LlmError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            LlmError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = GenerationRequest::new("Draft the claims")
            .with_system("You are a patent drafter")
            .with_temperature(0.2);
        assert_eq!(req.prompt, "Draft the claims");
        assert_eq!(req.system.as_deref(), Some("You are a patent drafter"));
        assert!((req.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_request_default_temperature() {
        let req = GenerationRequest::new("hello");
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.system.is_none());
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage::new(1200, 800);
        assert_eq!(usage.total_tokens, 2000);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::AuthenticationFailed {
            message: "Invalid API key".to_string(),
        };
        assert!(err.to_string().contains("Authentication failed"));

        let err = LlmError::RateLimited {
            message: "Too many requests".to_string(),
            retry_after: Some(60),
        };
        assert!(err.to_string().contains("Rate limited"));

        let err = LlmError::ServerError {
            message: "upstream overloaded".to_string(),
            status: Some(503),
        };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_llm_error_serialization() {
        let err = LlmError::RateLimited {
            message: "slow down".to_string(),
            retry_after: None,
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"type\":\"rate_limited\""));
    }
}
