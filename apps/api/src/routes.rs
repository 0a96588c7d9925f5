//! Route table and middleware.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::dashboard::routes())
        .merge(handlers::product::routes())
        .merge(handlers::category::routes())
        .merge(handlers::sale::routes())
        .merge(handlers::health::routes())
}

/// One allowed origin, the methods and headers the dashboard frontend sends.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!(origin, "CORS_ORIGIN is not a valid header value, cross-origin requests disabled");
            layer
        }
    }
}
