//! HTTP handlers, one module per resource.
//!
//! Each module exposes `routes()`; [`crate::router`] merges them under `/api`.
//!
//! ## Response Envelopes
//! ```text
//! list / get    200 {"data": <value>}
//! create        200 {"data": "<Entity> inserted successfully", "ID": <new id>}
//! failure       4xx/5xx {"error": "<message>", "code": "<CODE>"}
//! ```
//! `GET /productByCategory/{categoryID}` is the one route that answers with a
//! bare array.

pub mod category;
pub mod dashboard;
pub mod health;
pub mod product;
pub mod sale;

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

pub type ApiResult<T> = Result<T, ApiError>;

/// `{"data": ...}` wrapper used by almost every success response.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(DataResponse { data })
    }
}

/// Body returned by the create endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub data: String,

    #[serde(rename = "ID")]
    pub id: i64,
}

impl CreatedResponse {
    pub fn json(entity: &str, id: i64) -> Json<Self> {
        Json(CreatedResponse {
            data: format!("{entity} inserted successfully"),
            id,
        })
    }
}
