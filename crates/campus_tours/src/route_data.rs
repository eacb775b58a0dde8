use campus_directions::Waypoint;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// Cached walking route of a tour. Stored as a single JSON blob on the tour
/// and replaced as a whole, never patched.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct RouteData {
    pub waypoints: Vec<Waypoint>,
    pub segments: Vec<Segment>,
    pub computed_at: Timestamp,
}

impl RouteData {
    pub fn new(waypoints: Vec<Waypoint>, segments: Vec<Segment>) -> Self {
        Self {
            waypoints,
            segments,
            computed_at: Timestamp::now(),
        }
    }

    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_blob(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}
