use std::sync::Arc;

use campus_directions::DirectionsProvider;
use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    location::Location,
    storage::{StoreError, TourStore},
    tour_service::{NewTour, TourError, TourService},
};

use super::{
    guide_config::GuideConfig,
    tools::{CreateTourArgs, ToolCall, ToolDefinition, ToolName, tool_definitions},
};

const NO_LOCATIONS_FOUND: &str = "Error: None of the specified locations were found.";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Tour(#[from] TourError),
}

/// Per call state: who is asking and which locations the model was shown.
pub struct ToolContext {
    pub owner_id: i64,
    pub locations: FxHashMap<i64, Location>,
}

impl ToolContext {
    pub fn new(owner_id: i64, locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            owner_id,
            locations: locations
                .into_iter()
                .map(|location| (location.id, location))
                .collect(),
        }
    }

    pub fn load(owner_id: i64, store: &TourStore) -> Result<Self, StoreError> {
        Ok(Self::new(owner_id, store.locations()?))
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    /// Text handed back to the model
    pub message: String,
    pub created_tour_id: Option<i64>,
}

/// Executes the tools offered to the chat model. Built once and shared
/// between requests; everything specific to a call comes in through
/// [`ToolContext`].
pub struct TourGuide<P> {
    config: GuideConfig,
    tours: Arc<TourService<P>>,
}

impl<P: DirectionsProvider> TourGuide<P> {
    pub fn new(config: GuideConfig, tours: Arc<TourService<P>>) -> Self {
        Self { config, tours }
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    pub fn tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    pub async fn invoke(
        &self,
        context: &ToolContext,
        call: ToolCall,
    ) -> Result<ToolOutcome, ToolError> {
        let tool = ToolName::parse(&call.name).ok_or(ToolError::UnknownTool(call.name))?;
        debug!("TourGuide: invoking {}", tool.as_str());

        match tool {
            ToolName::CreateTour => {
                let args = serde_json::from_value::<CreateTourArgs>(call.arguments).map_err(
                    |source| ToolError::InvalidArguments {
                        tool: tool.as_str(),
                        source,
                    },
                )?;
                self.create_tour(context, args).await
            }
        }
    }

    /// Unknown ids are dropped. The route is computed like for any other new
    /// tour and its failures never reach the model.
    async fn create_tour(
        &self,
        context: &ToolContext,
        args: CreateTourArgs,
    ) -> Result<ToolOutcome, ToolError> {
        let stops = args
            .location_ids
            .iter()
            .filter_map(|location_id| context.locations.get(location_id))
            .collect::<Vec<_>>();

        if stops.is_empty() {
            return Ok(ToolOutcome {
                message: NO_LOCATIONS_FOUND.to_string(),
                created_tour_id: None,
            });
        }

        let tour = self
            .tours
            .create_tour(NewTour {
                owner_id: context.owner_id,
                name: args.tour_name.clone(),
                description: args.tour_description,
                location_ids: stops.iter().map(|location| location.id).collect(),
            })
            .await?;

        info!(
            "TourGuide: created tour {} for owner {}",
            tour.id, context.owner_id
        );

        let names = stops
            .iter()
            .map(|location| location.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(ToolOutcome {
            message: format!(
                "Created tour '{}' with {} stops: {}. The tour is now saved to your account.",
                args.tour_name,
                stops.len(),
                names
            ),
            created_tour_id: Some(tour.id),
        })
    }
}
