//! Shared application state.

use std::sync::Arc;

use insight_db::Database;

use crate::config::ApiConfig;

/// State handed to every handler through axum's `State` extractor.
///
/// Cloning is cheap: the database handle wraps a pool and the config sits
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
