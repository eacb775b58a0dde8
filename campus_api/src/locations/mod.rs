pub mod get_locations;
pub mod routes;
