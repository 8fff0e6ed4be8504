//! HTTP route handlers for the assistant server.

pub mod agent;

use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use utoipa::OpenApi;

use crate::dto::{HealthResponse, RootResponse};
use crate::error::AppError;
use crate::openapi::{ApiDoc, DOCS_HTML};
use crate::AppState;

/// Service info with links to the docs and health endpoints.
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses((status = 200, description = "Service info", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Self-Hosted AI Assistant Backend API".into(),
        docs_url: "/docs".into(),
        health_url: "/health".into(),
    })
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "meta",
    responses((status = 200, description = "Process is alive", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        environment: state.settings.environment.clone(),
    })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn docs() -> Html<&'static str> {
    Html(DOCS_HTML)
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
