//! # zgs-api: HTTP gateway for 0G Storage downloads
//!
//! Fetches a file from the 0G Storage network by root hash and streams it
//! to the caller. Retrieval and integrity checks are delegated to the
//! indexer via `zgs-indexer-client`; this crate only wires HTTP to it.
//!
//! ## API Surface
//!
//! | Path                     | Module                 | Purpose              |
//! |--------------------------|------------------------|----------------------|
//! | `/download/{rootHash}`   | [`routes::download`]   | File download        |
//! | `/api-docs`              | [`openapi`]            | Swagger UI           |
//! | `/api-docs/openapi.json` | [`openapi`]            | OpenAPI document     |
//! | `/swagger-ui`            | [`openapi`]            | Bundled UI (`swagger` feature) |
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → Handler
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

use axum::Router;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::download::router())
        .merge(openapi::router())
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}
