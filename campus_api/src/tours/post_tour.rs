use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campus_tours::{tour::Tour, tour_service::NewTour};

use crate::{error::ApiError, state::AppState};

pub struct TourCreated(Tour);

impl IntoResponse for TourCreated {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

impl OperationOutput for TourCreated {
    type Inner = Tour;
}

/// Creates the tour and computes its walking route. The tour is created even
/// when the route cannot be computed; `route_data` is null in that case.
pub async fn post_tour_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTour>,
) -> Result<TourCreated, ApiError> {
    let tour = state.tours.create_tour(body).await?;

    Ok(TourCreated(tour))
}
