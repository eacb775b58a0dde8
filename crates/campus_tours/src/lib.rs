pub mod guide;
pub mod location;
pub mod route_cache;
pub mod route_data;
pub mod route_error;
pub mod segment;
pub mod segment_assembler;
pub mod storage;
pub mod tour;
pub mod tour_service;
pub mod waypoint_sequence;

#[cfg(test)]
pub(crate) mod test_utils;

pub use campus_directions::{DirectionsProvider, Waypoint};
