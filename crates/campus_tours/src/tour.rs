use campus_directions::Waypoint;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{location::Location, route_data::RouteData};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct TourStop {
    /// Position in the tour, starting at 1
    pub order: u32,
    pub location: Location,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Tour {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub stops: Vec<TourStop>,
    pub route_data: Option<RouteData>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Tour without its stops, used in listings.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct TourSummary {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub stop_count: usize,
    pub has_route: bool,
    pub updated_at: Timestamp,
}

impl Tour {
    pub fn location_ids(&self) -> Vec<i64> {
        self.stops.iter().map(|stop| stop.location.id).collect()
    }

    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.stops
            .iter()
            .map(|stop| stop.location.waypoint())
            .collect()
    }

    /// Stop orders are exactly `1..=n`.
    pub fn has_contiguous_stops(&self) -> bool {
        self.stops
            .iter()
            .enumerate()
            .all(|(index, stop)| stop.order as usize == index + 1)
    }
}
