use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower::{ServiceBuilder, limit::GlobalConcurrencyLimitLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let http = &state.config().server;
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(http.request_timeout())
        .layer(GlobalConcurrencyLimitLayer::new(http.max_concurrent_requests));
    let body_limit = DefaultBodyLimit::max(http.body_limit_bytes);

    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/route", post(handlers::route))
        .route("/route/geojson", post(handlers::route_geojson))
        .route("/routes", post(handlers::routes))
        .layer(middleware)
        .layer(body_limit)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("unhandled middleware error: {err}") })),
        )
    }
}
