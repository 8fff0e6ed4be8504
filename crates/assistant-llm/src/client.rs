//! OpenAI-compatible chat client.
//!
//! Works with the OpenAI API and any compatible endpoint (set `api_base`).
//! One user message in, one completion out; no history, no streaming.

use std::time::{Duration, Instant};

use assistant_core::{AgentError, ModelConfig};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use backoff::ExponentialBackoffBuilder;
use tracing::info;

/// Token usage and timing metrics from an LLM call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LlmMetrics {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub elapsed_ms: u64,
}

/// Complete response from an LLM call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub metrics: LlmMetrics,
}

/// Converts any error into an AgentError::LlmError.
fn llm_err(e: impl ToString) -> AgentError {
    AgentError::LlmError(e.to_string())
}

/// Extracts content and metrics from a completion response.
pub(crate) fn extract_response(
    response: CreateChatCompletionResponse,
    elapsed_ms: u64,
) -> Result<LlmResponse, AgentError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AgentError::LlmError("No response content".into()))?;

    let (input_tokens, output_tokens) = response
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    info!(
        "LLM: {}ms, tokens: {}/{} (in/out)",
        elapsed_ms, input_tokens, output_tokens
    );

    Ok(LlmResponse {
        content,
        metrics: LlmMetrics { input_tokens, output_tokens, elapsed_ms },
    })
}

/// Client for OpenAI-compatible chat completion APIs.
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmClient {
    /// Creates a new client from a model configuration.
    pub fn new(config: &ModelConfig) -> Self {
        let mut openai = OpenAIConfig::new().with_api_key(&config.api_key);
        if let Some(base) = &config.api_base {
            openai = openai.with_api_base(base);
        }

        // Single attempt: provider errors, 429 included, surface immediately.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(openai).with_backoff(no_retry),
            model: config.model.clone(),
        }
    }

    /// Returns the model identifier requests are sent with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `user_input` as a single user message and returns the complete response.
    pub async fn chat(&self, user_input: &str) -> Result<LlmResponse, AgentError> {
        let start = Instant::now();
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_input)
                .build()
                .map_err(llm_err)?,
        )];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(llm_err)?;

        let response = self.client.chat().create(request).await.map_err(llm_err)?;
        extract_response(response, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(content: Option<&str>) -> CreateChatCompletionResponse {
        serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop",
                "logprobs": null
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
        }))
        .unwrap()
    }

    #[test]
    fn extracts_first_choice_and_usage() {
        let response = extract_response(completion(Some("Hello there")), 42).unwrap();
        assert_eq!(response.content, "Hello there");
        assert_eq!(
            response.metrics,
            LlmMetrics { input_tokens: 12, output_tokens: 5, elapsed_ms: 42 }
        );
    }

    #[test]
    fn missing_content_is_an_error() {
        let err = extract_response(completion(None), 1).unwrap_err();
        assert!(err.to_string().contains("No response content"));
    }

    #[test]
    fn client_uses_configured_model() {
        let client = LlmClient::new(&ModelConfig {
            model: "gpt-4o".into(),
            api_key: "sk-test".into(),
            api_base: Some("http://127.0.0.1:9/v1".into()),
        });
        assert_eq!(client.model(), "gpt-4o");
    }
}
