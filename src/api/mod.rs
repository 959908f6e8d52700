//! API layer - HTTP handlers and middleware
//!
//! Handlers stay thin: they extract the caller and the payload, call a
//! service and pick the status code. Everything is mounted under `/api`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::{cors_layer, create_router};
pub use state::AppState;
