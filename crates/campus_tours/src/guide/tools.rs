use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    CreateTour,
}

impl ToolName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "create_tour" => Some(ToolName::CreateTour),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::CreateTour => "create_tour",
        }
    }
}

/// A tool call as emitted by the chat model.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Create a new campus tour for the user with the given locations. Only call
/// this after the user confirmed they want the tour created.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct CreateTourArgs {
    /// Descriptive name for the tour
    pub tour_name: String,

    /// Brief description of the tour theme
    #[serde(default)]
    pub tour_description: String,

    /// Ordered list of location ids to visit
    pub location_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,

    /// JSON schema of the arguments
    pub parameters: Value,
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: ToolName::CreateTour.as_str().to_string(),
        description: String::from(
            "Create a new campus tour for the user with specified locations. \
             Only call this after the user confirms they want the tour created.",
        ),
        parameters: schema_for!(CreateTourArgs).as_value().clone(),
    }]
}
