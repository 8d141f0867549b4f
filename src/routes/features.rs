use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::FeatureListResponse, routes::AppState};

/// Lists the amenity labels in the order request vectors must follow
pub async fn list(State(state): State<Arc<AppState>>) -> Json<FeatureListResponse> {
    Json(FeatureListResponse {
        features: state.schema.labels().to_vec(),
    })
}
