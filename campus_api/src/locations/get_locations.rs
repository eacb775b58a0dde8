use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use campus_tours::location::Location;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize, JsonSchema)]
pub struct LocationPath {
    pub location_id: i64,
}

pub async fn get_locations_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Location>>, ApiError> {
    Ok(Json(state.tours.store().locations()?))
}

pub async fn get_location_handler(
    Path(path): Path<LocationPath>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Location>, ApiError> {
    state
        .tours
        .store()
        .location(path.location_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Location {} not found", path.location_id)))
}
