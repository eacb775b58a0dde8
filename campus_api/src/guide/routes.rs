use std::sync::Arc;

use aide::axum::{ApiRouter, routing::get};

use crate::{
    guide::tool_call::{get_tools_handler, post_tool_call_handler},
    state::AppState,
};

pub fn guide_routes(state: Arc<AppState>) -> ApiRouter {
    aide::generate::infer_responses(true);
    let router = ApiRouter::new()
        .api_route("/tools", get(get_tools_handler).post(post_tool_call_handler))
        .with_state(state);

    aide::generate::infer_responses(false);

    router
}
