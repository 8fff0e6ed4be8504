//! Agent invoker: text in, model text out.

use assistant_config::Settings;
use assistant_core::AgentError;
use async_trait::async_trait;
use tracing::debug;

use crate::client::LlmClient;

/// Something that turns a user input into a model answer.
///
/// The HTTP server only depends on this trait, so handlers can be exercised
/// without reaching a real provider.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Submits `input` and waits for the full textual output.
    async fn run(&self, input: &str) -> Result<String, AgentError>;
}

/// Agent backed by a hosted OpenAI-compatible chat model.
///
/// Stateless: every call is an independent single-message completion.
pub struct LlmAgent {
    client: LlmClient,
}

impl LlmAgent {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Model identifier this agent sends requests with.
    pub fn model(&self) -> &str {
        self.client.model()
    }
}

#[async_trait]
impl Agent for LlmAgent {
    async fn run(&self, input: &str) -> Result<String, AgentError> {
        debug!("Invoking {} ({} chars)", self.client.model(), input.len());
        let response = self.client.chat(input).await?;
        Ok(response.content)
    }
}

/// Builds the agent configured from `settings` (API key, model, optional base URL).
pub fn get_llm_agent(settings: &Settings) -> LlmAgent {
    LlmAgent::new(LlmClient::new(&settings.model_config()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    /// Serves a fake `/v1/chat/completions` and returns its base URL.
    async fn spawn_provider(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(req): Json<Value>| {
                let body = body.clone();
                async move {
                    let mut body = body;
                    if status.is_success() {
                        let echoed = req["messages"][0]["content"].as_str().unwrap_or_default().to_string();
                        let model = req["model"].as_str().unwrap_or_default().to_string();
                        body["model"] = json!(model);
                        body["choices"][0]["message"]["content"] = json!(format!("echo: {echoed}"));
                    }
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn settings_for(api_base: &str) -> Settings {
        let values = HashMap::from([
            ("openai_api_key".to_string(), "sk-test".to_string()),
            ("openai_model".to_string(), "gpt-test".to_string()),
            ("openai_base_url".to_string(), api_base.to_string()),
        ]);
        Settings::from_values(&values).unwrap()
    }

    fn completion_body() -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "" },
                "finish_reason": "stop",
                "logprobs": null
            }],
            "usage": { "prompt_tokens": 3, "completion_tokens": 4, "total_tokens": 7 }
        })
    }

    #[tokio::test]
    async fn run_returns_model_text() {
        let base = spawn_provider(StatusCode::OK, completion_body()).await;
        let agent = get_llm_agent(&settings_for(&base));
        assert_eq!(agent.model(), "gpt-test");

        let output = agent.run("What is Rust?").await.unwrap();
        assert_eq!(output, "echo: What is Rust?");
    }

    #[tokio::test]
    async fn provider_error_surfaces_as_llm_error() {
        let body = json!({
            "error": {
                "message": "Invalid model",
                "type": "invalid_request_error",
                "param": null,
                "code": null
            }
        });
        let base = spawn_provider(StatusCode::BAD_REQUEST, body).await;
        let agent = get_llm_agent(&settings_for(&base));

        let err = agent.run("hi").await.unwrap_err();
        assert!(matches!(err, AgentError::LlmError(_)));
        assert!(err.to_string().contains("Invalid model"));
    }

    #[tokio::test]
    async fn rate_limit_is_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let body = json!({
                        "error": {
                            "message": "Rate limit reached",
                            "type": "requests",
                            "param": null,
                            "code": "rate_limit_exceeded"
                        }
                    });
                    (StatusCode::TOO_MANY_REQUESTS, Json(body))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let agent = get_llm_agent(&settings_for(&format!("http://{addr}/v1")));
        let result = tokio::time::timeout(Duration::from_secs(5), agent.run("hi"))
            .await
            .expect("rate-limited call should fail without retrying");

        assert!(matches!(result, Err(AgentError::LlmError(_))));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
