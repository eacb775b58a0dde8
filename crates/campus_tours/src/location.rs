use campus_directions::Waypoint;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub category: String,
    pub historical_info: String,
}

/// Location as found in seed files, identified by its slug.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub historical_info: String,
}

impl Location {
    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.id, self.name.clone(), self.latitude, self.longitude)
    }
}
