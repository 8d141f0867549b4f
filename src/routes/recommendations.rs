use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendedHotel},
    routes::AppState,
    services::{providers::HotelSource, recommendations},
};

fn parse_body(
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<RecommendationRequest> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

async fn run(
    state: &AppState,
    source: &dyn HotelSource,
    request_id: &RequestId,
    request: RecommendationRequest,
) -> AppResult<Json<Vec<RecommendedHotel>>> {
    tracing::info!(
        request_id = %request_id,
        city = request.city.as_deref().unwrap_or("*"),
        provider = source.name(),
        "Processing recommendation request"
    );

    let hotels = recommendations::get_recommendations(source, &state.schema, request).await?;

    tracing::info!(
        request_id = %request_id,
        results = hotels.len(),
        "Recommendations ranked"
    );

    Ok(Json(hotels))
}

/// Handler for ranking hotels from the startup dataset
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Vec<RecommendedHotel>>> {
    let request = parse_body(payload)?;
    run(&state, state.dataset.as_ref(), &request_id, request).await
}

/// Handler for ranking hotels freshly extracted from the listings page
pub async fn recommend_live(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Vec<RecommendedHotel>>> {
    let request = parse_body(payload)?;
    run(&state, state.live.as_ref(), &request_id, request).await
}
