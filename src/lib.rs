//! AnimalFarm - livestock record-keeping API.
//!
//! Tracks animal types, breeds, individual animals (with lineage) and
//! periodic weight measurements behind role-based authentication.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, value objects and request/response shapes
//! - **services**: Business rules, access control and authentication
//! - **infra**: Database, migrations, repositories and seeding
//! - **notifications**: Outbound account notifications
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod notifications;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Role};
pub use errors::{AppError, AppResult};
