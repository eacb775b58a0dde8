use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_tours::{
    tour::Tour,
    tour_service::{TourDetailsUpdate, TourReplacement},
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize, JsonSchema)]
pub struct TourPath {
    pub tour_id: i64,
}

pub struct TourDeleted;

impl IntoResponse for TourDeleted {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

impl OperationOutput for TourDeleted {
    type Inner = ();
}

pub async fn get_tour_handler(
    Path(path): Path<TourPath>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Tour>, ApiError> {
    Ok(Json(state.tours.tour(path.tour_id)?))
}

/// Replaces name, description and the ordered stop list. A changed stop list
/// recomputes the walking route.
pub async fn put_tour_handler(
    Path(path): Path<TourPath>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<TourReplacement>,
) -> Result<Json<Tour>, ApiError> {
    Ok(Json(state.tours.replace_tour(path.tour_id, body).await?))
}

/// Updates name and/or description. The cached route is never recomputed.
pub async fn patch_tour_handler(
    Path(path): Path<TourPath>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<TourDetailsUpdate>,
) -> Result<Json<Tour>, ApiError> {
    Ok(Json(state.tours.update_details(path.tour_id, body)?))
}

pub async fn delete_tour_handler(
    Path(path): Path<TourPath>,
    State(state): State<Arc<AppState>>,
) -> Result<TourDeleted, ApiError> {
    state.tours.delete_tour(path.tour_id)?;

    Ok(TourDeleted)
}
