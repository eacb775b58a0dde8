use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{Router, http::Method};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    docs::{api_docs, docs_routes},
    guide::routes::guide_routes, locations::routes::locations_routes,
    state::AppState, tours::routes::tours_routes,
};

pub fn build_app(state: Arc<AppState>, api: &mut OpenApi) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    ApiRouter::new()
        .nest_api_service("/docs", docs_routes(state.clone()))
        .nest_api_service("/locations", locations_routes(state.clone()))
        .nest_api_service("/tours", tours_routes(state.clone()))
        .nest_api_service("/guide", guide_routes(state))
        .finish_api_with(api, api_docs)
        .layer(ServiceBuilder::new().layer(cors_layer))
}
