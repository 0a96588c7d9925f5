//! Health check for load balancers and monitoring.
//!
//! Healthy means the pool answers a query and every embedded migration has
//! been applied. Anything else is 503.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use super::ApiResult;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub migrations: MigrationCounts,
}

#[derive(Debug, Serialize)]
pub struct MigrationCounts {
    pub total: usize,
    pub applied: usize,
}

async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    if !state.db.health_check().await {
        warn!("Health check failed: database unreachable");
        return Err(ApiError::unavailable("Database unreachable"));
    }

    let status = state.db.migration_status().await.map_err(|e| {
        warn!(error = %e, "Health check failed: migration status unavailable");
        ApiError::unavailable("Migration status unavailable")
    })?;

    if !status.is_current() {
        warn!(total = status.total, applied = status.applied, "Pending migrations");
        return Err(ApiError::unavailable(format!(
            "{} of {} migrations applied",
            status.applied, status.total
        )));
    }

    Ok(Json(HealthResponse {
        status: "ok",
        migrations: MigrationCounts {
            total: status.total,
            applied: status.applied,
        },
    }))
}
