use std::sync::Arc;

use aide::axum::{ApiRouter, routing::get};

use crate::{
    locations::get_locations::{get_location_handler, get_locations_handler},
    state::AppState,
};

pub fn locations_routes(state: Arc<AppState>) -> ApiRouter {
    aide::generate::infer_responses(true);
    let router = ApiRouter::new()
        .api_route("/", get(get_locations_handler))
        .api_route("/{location_id}", get(get_location_handler))
        .with_state(state);

    aide::generate::infer_responses(false);

    router
}
