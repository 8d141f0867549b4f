use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    models::FeatureSchema,
    services::providers::HotelSource,
};

pub mod features;
pub mod recommendations;

/// Shared application state
///
/// Everything here is read-only after startup, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub schema: Arc<FeatureSchema>,
    /// Hotels loaded from the bulk dataset
    pub dataset: Arc<dyn HotelSource>,
    /// Hotels extracted from the live listings page, one browser session per request
    pub live: Arc<dyn HotelSource>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/features", get(features::list))
        .route("/recommend", post(recommendations::recommend))
        .route("/recommend/live", post(recommendations::recommend_live))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
