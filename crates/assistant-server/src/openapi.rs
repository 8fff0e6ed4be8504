//! OpenAPI document and the Swagger UI page that renders it.

use utoipa::OpenApi;

use crate::dto::{AgentRequest, AgentResponse, HealthResponse, RootResponse};
use crate::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Self-Hosted AI Assistant Backend",
        version = "0.1.0",
        description = "Self-hosted backend for internal AI assistants and agent-backed tools."
    ),
    paths(
        crate::handlers::root,
        crate::handlers::health,
        crate::handlers::agent::invoke,
    ),
    components(schemas(
        RootResponse,
        HealthResponse,
        AgentRequest,
        AgentResponse,
        ErrorResponse,
    )),
    tags(
        (name = "meta", description = "Service info and health"),
        (name = "agent", description = "LLM agent invocation"),
    )
)]
pub struct ApiDoc;

/// Swagger UI shell; assets come from the jsDelivr CDN.
pub const DOCS_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Self-Hosted AI Assistant Backend - Swagger UI</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    </script>
</body>
</html>
"##;
