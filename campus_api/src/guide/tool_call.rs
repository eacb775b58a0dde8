use std::sync::Arc;

use axum::{Json, extract::State};
use campus_tours::guide::{ToolCall, ToolContext, ToolDefinition, ToolOutcome};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize, JsonSchema)]
pub struct ToolCallRequest {
    /// User on whose behalf the model acts
    pub owner_id: i64,
    pub tool_call: ToolCall,
}

#[derive(Serialize, JsonSchema)]
pub struct GuideManifest {
    pub model: String,

    /// Whether a model credential is configured
    pub chat_available: bool,
    pub instructions: String,
    pub tools: Vec<ToolDefinition>,
}

pub async fn get_tools_handler(State(state): State<Arc<AppState>>) -> Json<GuideManifest> {
    let config = state.guide.config();

    Json(GuideManifest {
        model: config.model.clone(),
        chat_available: config.has_credential(),
        instructions: config.instructions.clone(),
        tools: state.guide.tools(),
    })
}

pub async fn post_tool_call_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ToolCallRequest>,
) -> Result<Json<ToolOutcome>, ApiError> {
    let context = ToolContext::load(body.owner_id, state.tours.store())?;

    let outcome = state.guide.invoke(&context, body.tool_call).await?;

    Ok(Json(outcome))
}
