use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One turn-by-turn instruction within a leg.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct Step {
    pub distance: String,
    pub duration: String,

    /// Provider formatted instruction, may contain HTML markup.
    pub instruction: String,

    /// Encoded polyline (precision 5)
    pub polyline: String,
}

/// Walking directions between one origin and one destination, normalized from
/// the first leg of the provider's primary route.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct WalkingDirections {
    pub distance: String,
    pub duration: String,

    /// Encoded overview polyline of the whole route
    pub polyline: String,
    pub steps: Vec<Step>,
}
