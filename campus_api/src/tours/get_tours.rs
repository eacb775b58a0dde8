use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use campus_tours::tour::TourSummary;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    error::ApiError,
    pagination::{PaginatedResponse, Pagination, default_page, default_per_page},
    state::AppState,
};

#[derive(Deserialize, JsonSchema)]
pub struct ToursQuery {
    pub owner_id: Option<i64>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

pub async fn get_tours_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ToursQuery>,
) -> Result<Json<PaginatedResponse<TourSummary>>, ApiError> {
    let pagination = Pagination::new(query.page, query.per_page);

    let page = state
        .tours
        .tours(query.owner_id, pagination.per_page, pagination.offset())?;

    Ok(Json(pagination.response(page.tours, page.total)))
}
