//! LLM client and agent invoker for the assistant backend.
//!
//! - [`Agent`] — The seam the HTTP server calls through
//! - [`LlmAgent`] / [`get_llm_agent`] — Agent backed by a hosted OpenAI-compatible model
//! - [`LlmClient`] — Lower-level chat completion client
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use assistant_config::get_settings;
//! use assistant_llm::{get_llm_agent, Agent};
//!
//! let agent = get_llm_agent(get_settings()?);
//! let output = agent.run("Summarize the Rust ownership model.").await?;
//! ```

mod agent;
mod client;

pub use agent::{get_llm_agent, Agent, LlmAgent};
pub use assistant_core::AgentError;
pub use client::{LlmClient, LlmMetrics, LlmResponse};
