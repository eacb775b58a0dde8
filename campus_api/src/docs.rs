use std::sync::Arc;

use aide::{
    axum::{
        ApiRouter, IntoApiResponse,
        routing::{get, get_with},
    },
    openapi::OpenApi,
    scalar::Scalar,
    swagger::Swagger,
    transform::TransformOpenApi,
};
use axum::{Extension, Json, response::IntoResponse};

use crate::state::AppState;

const API_TITLE: &str = "Campus Tours API";
const PAGE_TITLE: &str = "Campus Tours";
const OPENAPI_JSON: &str = "/docs/private/api.json";

/// Interactive pages under `/docs`, both reading the document served at
/// [`OPENAPI_JSON`].
pub fn docs_routes(state: Arc<AppState>) -> ApiRouter {
    aide::generate::infer_responses(true);

    let router = ApiRouter::new()
        .api_route(
            "/",
            get_with(
                Scalar::new(OPENAPI_JSON).with_title(PAGE_TITLE).axum_handler(),
                |op| op.description("Campus Tours API reference."),
            ),
        )
        .api_route(
            "/swagger",
            get_with(
                Swagger::new(OPENAPI_JSON).with_title(PAGE_TITLE).axum_handler(),
                |op| op.description("Swagger UI to try the tour endpoints."),
            ),
        )
        .route("/private/api.json", get(serve_docs))
        .with_state(state);

    aide::generate::infer_responses(false);

    router
}

pub fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title(API_TITLE)
        .summary("Curated campus walking tours")
        .description(
            "Locations, tours and their cached walking routes. Writing a tour's \
             stops recomputes its route; a tour whose route could not be computed \
             has `route_data: null`. The guide endpoints run the tools offered to \
             the tour guide chat model.",
        )
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}
