use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const COORDINATE_SCALE: f64 = 1_000_000.0;

/// Snapshot of a location taken when a route is calculated.
///
/// Coordinates are rounded to 6 decimal places, the precision locations are
/// stored with. A waypoint is copied into every segment that uses it, so later
/// edits to the location never change an already computed segment.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub location_id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub fn new(location_id: i64, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            location_id,
            name: name.into(),
            lat: round_coordinate(lat),
            lng: round_coordinate(lng),
        }
    }

    /// `"lat,lng"`, the format the directions provider expects for
    /// `origin` and `destination`.
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl Display for Waypoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.to_query_param())
    }
}

impl From<&Waypoint> for geo_types::Point {
    fn from(value: &Waypoint) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

fn round_coordinate(value: f64) -> f64 {
    if value.is_finite() {
        (value * COORDINATE_SCALE).round() / COORDINATE_SCALE
    } else {
        value
    }
}
