//! Core domain types and error definitions for the assistant backend.
//!
//! This crate provides the types shared between the settings loader, the LLM
//! client and the HTTP server:
//!
//! - [`AgentError`] — Error type for agent invocations
//! - [`ModelConfig`] — Which model to call, with which key, at which endpoint
//!
//! # Example
//!
//! ```rust
//! use assistant_core::ModelConfig;
//!
//! let model = ModelConfig {
//!     model: "gpt-4o-mini".to_string(),
//!     api_key: "sk-test".to_string(),
//!     api_base: None,
//! };
//!
//! assert!(!format!("{:?}", model).contains("sk-test"));
//! ```

use std::fmt;

use thiserror::Error;

/// Placeholder printed in place of secrets.
pub const REDACTED: &str = "[REDACTED]";

/// Errors that can occur while invoking the agent.
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM API request failed or returned nothing usable.
    #[error("LLM request failed: {0}")]
    LlmError(String),
}

/// Configuration for the hosted LLM the agent talks to.
#[derive(Clone)]
pub struct ModelConfig {
    /// The model identifier sent to the provider (e.g., "gpt-4o-mini").
    pub model: String,
    /// Provider API key. Never printed.
    pub api_key: String,
    /// Optional API base URL for OpenAI-compatible endpoints.
    pub api_base: Option<String>,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model", &self.model)
            .field("api_key", &REDACTED)
            .field("api_base", &self.api_base)
            .finish()
    }
}
