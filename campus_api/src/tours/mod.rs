pub mod get_tours;
pub mod post_tour;
pub mod routes;
pub mod tour;
pub mod tour_route;
