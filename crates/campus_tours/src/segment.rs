use campus_directions::{Step, WalkingDirections, Waypoint};
use geo_types::{Coord, LineString};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const POLYLINE_PRECISION: u32 = 5;

/// Walking directions between two consecutive stops of a tour.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Segment {
    pub segment_index: usize,
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub distance: String,
    pub duration: String,
    pub polyline: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Error)]
#[error("Invalid polyline for segment {segment_index}: {message}")]
pub struct InvalidPolyline {
    pub segment_index: usize,
    pub message: String,
}

impl Segment {
    pub fn from_directions(
        segment_index: usize,
        origin: Waypoint,
        destination: Waypoint,
        directions: WalkingDirections,
    ) -> Self {
        Self {
            segment_index,
            origin,
            destination,
            distance: directions.distance,
            duration: directions.duration,
            polyline: directions.polyline,
            steps: directions.steps,
        }
    }

    /// Decoded overview polyline in `(lng, lat)` order. Segments without a
    /// polyline fall back to the straight line between both stops.
    pub fn path(&self) -> Result<LineString<f64>, InvalidPolyline> {
        if self.polyline.is_empty() {
            return Ok(LineString::new(vec![
                Coord {
                    x: self.origin.lng,
                    y: self.origin.lat,
                },
                Coord {
                    x: self.destination.lng,
                    y: self.destination.lat,
                },
            ]));
        }

        polyline::decode_polyline(&self.polyline, POLYLINE_PRECISION).map_err(|error| {
            InvalidPolyline {
                segment_index: self.segment_index,
                message: error.to_string(),
            }
        })
    }
}
