use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use insight_core::{Category, CoreError, NewCategory};

use super::{ApiResult, CreatedResponse, DataResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/category/{id}", get(get_category))
        .route("/addCategory", post(add_category))
}

async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<Category>>>> {
    let categories = state.db.categories().list().await?;
    Ok(DataResponse::json(categories))
}

async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DataResponse<Category>>> {
    let Path(id) = id?;

    let category = state
        .db
        .categories()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::CategoryNotFound(id))?;

    Ok(DataResponse::json(category))
}

async fn add_category(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(new_category) = body?;
    new_category.validate().map_err(CoreError::from)?;

    let category = state
        .db
        .categories()
        .insert(&new_category)
        .await
        .map_err(ApiError::insert_failed)?;

    info!(id = category.id, name = %category.name, "Category created");
    Ok(CreatedResponse::json("Category", category.id))
}
