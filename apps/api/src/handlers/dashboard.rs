use axum::{extract::State, routing::get, Json, Router};

use insight_core::Dashboard;

use super::{ApiResult, DataResponse};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(list_dashboards))
}

/// All dashboards with metrics and feedback, each collection capped at
/// `DASHBOARD_DETAIL_LIMIT` entries.
async fn list_dashboards(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<Dashboard>>>> {
    let limit = state.config.dashboard_detail_limit;
    let dashboards = state.db.dashboards().list_with_details(limit).await?;
    Ok(DataResponse::json(dashboards))
}
