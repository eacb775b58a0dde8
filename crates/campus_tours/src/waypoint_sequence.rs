use campus_directions::Waypoint;

use crate::route_error::RouteError;

/// Ordered list of at least two waypoints with valid coordinates.
///
/// Consecutive identical waypoints are kept: they produce a zero length
/// segment rather than being merged.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSequence(Vec<Waypoint>);

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedSequence {
    /// A single stop has nothing to route between.
    SingleStop(Waypoint),
    Routable(WaypointSequence),
}

impl WaypointSequence {
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Consecutive `(segment_index, origin, destination)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &Waypoint, &Waypoint)> {
        self.0
            .windows(2)
            .enumerate()
            .map(|(index, pair)| (index, &pair[0], &pair[1]))
    }

    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.0
    }
}

pub fn validate_waypoints(waypoints: Vec<Waypoint>) -> Result<ValidatedSequence, RouteError> {
    if let Some((position, waypoint)) = waypoints
        .iter()
        .enumerate()
        .find(|(_, waypoint)| !waypoint.has_valid_coordinates())
    {
        return Err(RouteError::InvalidCoordinates {
            position,
            location_id: waypoint.location_id,
        });
    }

    let mut waypoints = waypoints;
    match waypoints.len() {
        0 => Err(RouteError::EmptySequence),
        1 => Ok(ValidatedSequence::SingleStop(waypoints.remove(0))),
        _ => Ok(ValidatedSequence::Routable(WaypointSequence(waypoints))),
    }
}
