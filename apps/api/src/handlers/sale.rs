use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};

use insight_core::{CoreError, Sale};

use super::{ApiResult, DataResponse};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sale/{id}", get(get_sale))
}

async fn list_sales(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Vec<Sale>>>> {
    let sales = state.db.sales().list().await?;
    Ok(DataResponse::json(sales))
}

async fn get_sale(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DataResponse<Sale>>> {
    let Path(id) = id?;

    let sale = state
        .db
        .sales()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::SaleNotFound(id))?;

    Ok(DataResponse::json(sale))
}
