use std::sync::Arc;

use aide::axum::{ApiRouter, routing::get};

use crate::{
    state::AppState,
    tours::{
        get_tours::get_tours_handler,
        post_tour::post_tour_handler,
        tour::{delete_tour_handler, get_tour_handler, patch_tour_handler, put_tour_handler},
        tour_route::tour_route_handler,
    },
};

pub fn tours_routes(state: Arc<AppState>) -> ApiRouter {
    aide::generate::infer_responses(true);
    let router = ApiRouter::new()
        .api_route("/", get(get_tours_handler).post(post_tour_handler))
        .api_route(
            "/{tour_id}",
            get(get_tour_handler)
                .put(put_tour_handler)
                .patch(patch_tour_handler)
                .delete(delete_tour_handler),
        )
        .route("/{tour_id}/route", axum::routing::get(tour_route_handler))
        .with_state(state);

    aide::generate::infer_responses(false);

    router
}
