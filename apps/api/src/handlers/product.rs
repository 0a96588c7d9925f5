//! Product routes.
//!
//! `addProduct` checks the category up front so the common mistake gets a
//! clear message; the foreign key on `products.category_id` still catches a
//! category that disappears between the check and the insert.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

use insight_core::{CoreError, NewProduct, Product, ProductWithCategory};

use super::{ApiResult, CreatedResponse, DataResponse};
use crate::error::{codes, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/product/{id}", get(get_product))
        .route("/productByCategory/{category_id}", get(list_products_by_category))
        .route("/addProduct", post(add_product))
}

async fn list_products(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<Product>>>> {
    let products = state.db.products().list().await?;
    Ok(DataResponse::json(products))
}

async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let Path(id) = id?;

    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    Ok(DataResponse::json(product))
}

/// Unlike the other reads this returns the bare array, and treats an empty
/// result as 404.
async fn list_products_by_category(
    State(state): State<AppState>,
    category_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<ProductWithCategory>>> {
    let Path(category_id) = category_id.map_err(|_| {
        ApiError::new(StatusCode::NOT_FOUND, codes::CATEGORY_NOT_FOUND, "Category not found")
    })?;

    let products = state.db.products().list_by_category(category_id).await?;
    if !products.is_empty() {
        return Ok(Json(products));
    }

    debug!(category_id, "No products for category");
    if state.db.categories().exists(category_id).await? {
        Err(CoreError::CategoryEmpty(category_id).into())
    } else {
        Err(CoreError::CategoryNotFound(category_id).into())
    }
}

async fn add_product(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(new_product) = body?;
    new_product.validate().map_err(CoreError::from)?;

    if !state.db.categories().exists(new_product.category_id).await? {
        return Err(CoreError::UnknownCategory(new_product.category_id).into());
    }

    let product = state
        .db
        .products()
        .insert(&new_product)
        .await
        .map_err(ApiError::insert_failed)?;

    info!(id = product.id, category_id = product.category_id, "Product created");
    Ok(CreatedResponse::json("Product", product.id))
}
