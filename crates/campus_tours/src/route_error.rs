use std::fmt::Display;

use campus_directions::{DirectionsError, DirectionsErrorKind, Waypoint};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Cannot build a route from an empty list of stops")]
    EmptySequence,

    #[error("Stop {position} (location {location_id}) has invalid coordinates")]
    InvalidCoordinates { position: usize, location_id: i64 },

    #[error("Segment {segment_index} ({origin} -> {destination}) failed: {source}")]
    Directions {
        segment_index: usize,
        origin: i64,
        destination: i64,
        #[source]
        source: DirectionsError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteErrorKind {
    EmptySequence,
    InvalidCoordinates,
    TransportFailure,
    ProviderRejected,
    ConfigurationMissing,
}

impl RouteError {
    pub fn directions(
        segment_index: usize,
        origin: &Waypoint,
        destination: &Waypoint,
        source: DirectionsError,
    ) -> Self {
        RouteError::Directions {
            segment_index,
            origin: origin.location_id,
            destination: destination.location_id,
            source,
        }
    }

    pub fn kind(&self) -> RouteErrorKind {
        match self {
            RouteError::EmptySequence => RouteErrorKind::EmptySequence,
            RouteError::InvalidCoordinates { .. } => RouteErrorKind::InvalidCoordinates,
            RouteError::Directions { source, .. } => match source.kind() {
                DirectionsErrorKind::TransportFailure => RouteErrorKind::TransportFailure,
                DirectionsErrorKind::ProviderRejected => RouteErrorKind::ProviderRejected,
                DirectionsErrorKind::ConfigurationMissing => RouteErrorKind::ConfigurationMissing,
            },
        }
    }

    /// Index of the segment whose directions call failed.
    pub fn segment_index(&self) -> Option<usize> {
        match self {
            RouteError::Directions { segment_index, .. } => Some(*segment_index),
            _ => None,
        }
    }
}

impl Display for RouteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RouteErrorKind::EmptySequence => "empty_sequence",
                RouteErrorKind::InvalidCoordinates => "invalid_coordinates",
                RouteErrorKind::TransportFailure => "transport_failure",
                RouteErrorKind::ProviderRejected => "provider_rejected",
                RouteErrorKind::ConfigurationMissing => "configuration_missing",
            }
        )
    }
}
