//! Application error types and Axum response conversion.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// No route matched.
    NotFound,
    /// Request body could not be turned into the expected shape.
    InvalidBody { status: StatusCode, detail: String },
    /// The LLM provider call failed. Detail is only kept in debug mode.
    Upstream(Option<String>),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found", None),
            AppError::InvalidBody { status, detail } => (status, "invalid request body", Some(detail)),
            AppError::Upstream(detail) => (StatusCode::INTERNAL_SERVER_ERROR, "agent invocation failed", detail),
        };
        let body = ErrorResponse { error: error.to_string(), detail };
        (status, Json(body)).into_response()
    }
}
