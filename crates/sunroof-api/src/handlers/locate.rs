use std::sync::Arc;

use axum::{extract::State, Json};
use sunroof_core::models::{BuildingMatch, GeoPoint};

use crate::dto::LocateRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn locate_building(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocateRequest>,
) -> Result<Json<BuildingMatch>, ApiError> {
    tracing::info!(
        latitude = request.latitude,
        longitude = request.longitude,
        "Processing locate request"
    );

    let point = GeoPoint::new(request.latitude, request.longitude);
    let matched = state.pipeline.locate(point).await.map_err(|e| {
        tracing::error!(error = %e, "Locate pipeline failed");
        ApiError::from(e)
    })?;

    match matched {
        Some(building) => Ok(Json(building)),
        None => Err(ApiError::not_found("No building footprint within the search radius")),
    }
}
