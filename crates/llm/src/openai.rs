//! OpenAI-Compatible Provider
//!
//! Implementation of the LlmProvider trait against an OpenAI-compatible
//! chat-completions endpoint. Rate-limit (429) and transient server (5xx)
//! responses are retried here with bounded exponential backoff; callers
//! above this adapter never retry.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http_client::build_http_client;
use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{GenerationRequest, GenerationResponse, LlmError, LlmResult, TokenUsage};

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default per-request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Maximum attempts per call (first attempt + retries)
const MAX_ATTEMPTS: u32 = 3;

/// Initial backoff delay, doubled after each retried attempt
const INITIAL_BACKOFF_MS: u64 = 500;

/// Configuration for the OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: Option<String>,
    /// Base URL override for OpenAI-compatible gateways
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: "gpt-4o".to_string(),
            max_tokens: 4096,
        }
    }
}

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: build_http_client(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut messages: Vec<serde_json::Value> = Vec::new();
        if let Some(system) = &request.system {
            messages.push(serde_json::json!({
                "role": "system",
                "content": system
            }));
        }
        messages.push(serde_json::json!({
            "role": "user",
            "content": request.prompt
        }));

        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": request.temperature,
            "messages": messages,
        })
    }

    /// Whether a failed attempt should be retried after backoff.
    fn is_retryable(error: &LlmError) -> bool {
        matches!(
            error,
            LlmError::RateLimited { .. } | LlmError::ServerError { .. }
        )
    }

    /// Run one HTTP attempt.
    async fn attempt(&self, body: &serde_json::Value, api_key: &str) -> LlmResult<GenerationResponse> {
        let response = self
            .client
            .post(self.base_url())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status.as_u16(), &body_text, "openai"));
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| LlmError::ParseError {
                message: format!("Failed to decode completion response: {}", e),
            })?;

        self.parse_response(api_response)
    }

    /// Convert the wire response into a `GenerationResponse`.
    fn parse_response(&self, response: ApiResponse) -> LlmResult<GenerationResponse> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::ParseError {
                message: "Completion response contained no text content".to_string(),
            })?;

        let usage = response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(GenerationResponse {
            content,
            usage,
            model: response.model.unwrap_or_else(|| self.config.model.clone()),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse> {
        let api_key = self
            .config
            .api_key
            .clone()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let body = self.build_request_body(&request);
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.attempt(&body, &api_key).await {
                Ok(response) => {
                    debug!(
                        model = %response.model,
                        total_tokens = response.usage.total_tokens,
                        "completion finished"
                    );
                    return Ok(response);
                }
                Err(e) if Self::is_retryable(&e) && attempt < MAX_ATTEMPTS => {
                    warn!(
                        attempt,
                        backoff_ms,
                        error = %e,
                        "completion attempt failed, backing off"
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(backoff_ms)).await;
                    backoff_ms *= 2;
                }
                Err(e) => return Err(e),
            }
        }

        // The loop always returns on the final attempt
        Err(LlmError::Other {
            message: "completion retry loop exhausted".to_string(),
        })
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
