mod schema;
pub mod store_error;
pub mod tour_store;

pub use store_error::StoreError;
pub use tour_store::{TourPage, TourStore};
