//! HTTP request handlers.

pub mod animal_handler;
pub mod animal_type_handler;
pub mod auth_handler;
pub mod breed_handler;
pub mod user_handler;
pub mod weighting_handler;

pub use animal_handler::animal_routes;
pub use animal_type_handler::animal_type_routes;
pub use auth_handler::auth_routes;
pub use breed_handler::breed_routes;
pub use user_handler::user_routes;
pub use weighting_handler::weighting_routes;
