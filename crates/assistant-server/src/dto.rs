//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub docs_url: String,
    pub health_url: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
}

/// Request to invoke the agent with a plain text input.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AgentRequest {
    pub input: String,
}

/// The agent's textual answer.
#[derive(Debug, Serialize, ToSchema)]
pub struct AgentResponse {
    pub output: String,
}
