//! HTTP server entry point and Axum router setup.
//!
//! Loads settings once (failing fast on a missing API key), builds the LLM
//! agent, configures routes, and serves on the configured bind address.

mod dto;
mod error;
mod handlers;
mod openapi;
mod services;

use std::sync::Arc;
use std::time::Duration;

use assistant_config::{get_settings, Settings};
use assistant_llm::{get_llm_agent, Agent};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared server state accessible from all handlers.
pub struct AppState {
    pub settings: &'static Settings,
    pub agent: Arc<dyn Agent>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = get_settings().context("failed to load settings")?;

    let default_filter = if settings.debug {
        "info,assistant_server=debug,assistant_llm=debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .compact()
        .init();

    info!(
        "Environment: {} (debug: {}), model: {}",
        settings.environment, settings.debug, settings.model
    );
    match &settings.env_file {
        Some(path) => info!("Loaded overrides from {}", path.display()),
        None => debug!("No .env file found, using process environment only"),
    }
    if let Some(base) = &settings.api_base {
        info!("Using OpenAI-compatible endpoint: {}", base);
    }

    let state = Arc::new(AppState {
        settings,
        agent: Arc::new(get_llm_agent(settings)),
    });

    let app = build_router(state);

    let addr = settings.bind_addr.as_str();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Builds the application router: logged API routes plus an unlogged health probe.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/agent/invoke", post(handlers::agent::invoke))
        .route("/openapi.json", get(handlers::openapi_json))
        .route("/docs", get(handlers::docs))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
