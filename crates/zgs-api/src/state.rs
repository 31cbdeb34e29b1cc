//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.

use std::sync::Arc;

use zgs_indexer_client::Indexer;

use crate::config::AppConfig;

/// Shared application state passed to all route handlers.
///
/// Cheap to clone: both members are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Retrieval capability. `IndexerClient` in production.
    pub indexer: Arc<dyn Indexer>,
}

impl AppState {
    pub fn new(config: AppConfig, indexer: Arc<dyn Indexer>) -> Self {
        Self {
            config: Arc::new(config),
            indexer,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("indexer", &"<dyn Indexer>")
            .finish()
    }
}
