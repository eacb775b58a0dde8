pub mod directions_error;
pub mod directions_provider;
pub mod google_directions_api;
pub mod walking_directions;
pub mod waypoint;

pub use directions_error::{DirectionsError, DirectionsErrorKind};
pub use directions_provider::DirectionsProvider;
pub use google_directions_api::{GoogleDirectionsClient, GoogleDirectionsClientParams};
pub use walking_directions::{Step, WalkingDirections};
pub use waypoint::Waypoint;
