//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document.
//!
//! | Path | Content |
//! |------|---------|
//! | `/api-docs`, `/api-docs/` | Swagger UI with the document embedded |
//! | `/api-docs/openapi.json` | Raw OpenAPI JSON |
//! | `/swagger-ui` | Bundled Swagger UI (`swagger` feature only) |
//!
//! The `/api-docs` page loads its assets from the `swagger-ui-dist` CDN
//! bundle; the document itself is inlined so the page never calls back into
//! the API. Builds with the `swagger` feature also serve the assets locally.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::server::ServerBuilder;
use utoipa::OpenApi;

use crate::error::AppError;
use crate::state::AppState;

/// Assembled OpenAPI spec for the gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "0G Storage API",
        version = "1.0.0",
        description = "API documentation for 0G Storage service"
    ),
    paths(crate::routes::download::download_file),
    components(schemas(
        crate::error::ErrorBody,
        crate::routes::download::BinaryFile,
    )),
    tags(
        (name = "storage", description = "File retrieval from 0G Storage"),
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with the development server set to `port`.
pub fn api_doc(port: u16) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![ServerBuilder::new()
        .url(format!("http://localhost:{port}"))
        .description(Some("Development server"))
        .build()]);
    doc
}

/// Build the documentation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api-docs", get(swagger_ui))
        .route("/api-docs/", get(swagger_ui))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(bundled_ui())
}

/// Locally served Swagger UI assets, pointed at `/api-docs/openapi.json`.
#[cfg(feature = "swagger")]
fn bundled_ui() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json")),
    )
}

#[cfg(not(feature = "swagger"))]
fn bundled_ui() -> Router<AppState> {
    Router::new()
}

/// GET /api-docs/openapi.json: Return the generated OpenAPI specification.
async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc(state.config.port))
}

/// GET /api-docs: Interactive Swagger UI.
async fn swagger_ui(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let spec = serde_json::to_string(&api_doc(state.config.port))
        .map_err(|e| AppError::Internal(format!("failed to serialize OpenAPI document: {e}")))?;
    Ok(Html(render_swagger_ui(&spec)))
}

const SWAGGER_UI_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>0G Storage API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = function () {
      window.ui = SwaggerUIBundle({
        spec: __OPENAPI_SPEC__,
        dom_id: "#swagger-ui",
        deepLinking: true,
      });
    };
  </script>
</body>
</html>
"##;

/// Inline `spec_json` into the Swagger UI page.
///
/// `</` is escaped so no string inside the document can close the script tag.
fn render_swagger_ui(spec_json: &str) -> String {
    SWAGGER_UI_TEMPLATE.replace("__OPENAPI_SPEC__", &spec_json.replace("</", "<\\/"))
}
