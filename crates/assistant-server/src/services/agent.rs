//! Agent invocation service: runs the agent and classifies failures.

use tracing::{error, info};

use crate::error::AppError;
use crate::AppState;

/// Runs the configured agent on `input` and returns its output.
///
/// Provider failures are logged and mapped to [`AppError::Upstream`]; the
/// provider's message is only forwarded when debug mode is on.
pub async fn invoke(state: &AppState, input: &str) -> Result<String, AppError> {
    info!("Agent request: {}", preview(input));

    state.agent.run(input).await.map_err(|e| {
        error!("Agent error: {}", e);
        AppError::Upstream(state.settings.debug.then(|| e.to_string()))
    })
}

const PREVIEW_LEN: usize = 50;

/// First `PREVIEW_LEN` bytes of `input`, with an ellipsis only when cut.
fn preview(input: &str) -> String {
    match input.get(..PREVIEW_LEN) {
        Some(head) if head.len() < input.len() => format!("{head}..."),
        _ => input.to_string(),
    }
}
