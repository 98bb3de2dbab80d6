//! Shared test support: a scripted LLM provider.

use std::sync::Mutex;

use async_trait::async_trait;

use draftsmith_llm::{
    GenerationRequest, GenerationResponse, LlmError, LlmProvider, LlmResult, TokenUsage,
};

/// Scripted provider: pops one queued response per call, in order, and
/// records the prompts it received.
pub struct ScriptedProvider {
    responses: Mutex<Vec<LlmResult<GenerationResponse>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<LlmResult<GenerationResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(content: &str) -> LlmResult<GenerationResponse> {
        Ok(GenerationResponse {
            content: content.to_string(),
            usage: TokenUsage::new(150, 75),
            model: "scripted-model".to_string(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse> {
        self.prompts.lock().unwrap().push(request.prompt);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::Other {
                message: "scripted provider exhausted".to_string(),
            });
        }
        responses.remove(0)
    }
}
