use std::future::Future;

use crate::{
    directions_error::DirectionsError, walking_directions::WalkingDirections, waypoint::Waypoint,
};

/// Source of walking directions for a single origin/destination pair.
///
/// Implementations translate exactly one request into one result: no retries
/// and no caching happen at this layer.
pub trait DirectionsProvider: Send + Sync {
    fn walking_directions(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> impl Future<Output = Result<WalkingDirections, DirectionsError>> + Send;
}
