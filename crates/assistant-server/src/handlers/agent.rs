//! Agent invocation handler.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::dto::{AgentRequest, AgentResponse};
use crate::error::{AppError, ErrorResponse};
use crate::services;
use crate::AppState;

/// Invokes the agent with a simple text input.
#[utoipa::path(
    post,
    path = "/agent/invoke",
    tag = "agent",
    request_body = AgentRequest,
    responses(
        (status = 200, description = "Model output", body = AgentResponse),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 415, description = "Missing JSON content type", body = ErrorResponse),
        (status = 422, description = "Missing or non-string `input`", body = ErrorResponse),
        (status = 500, description = "LLM provider call failed", body = ErrorResponse),
    )
)]
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>, AppError> {
    let Json(req) = payload?;
    let output = services::agent::invoke(&state, &req.input).await?;
    Ok(Json(AgentResponse { output }))
}
