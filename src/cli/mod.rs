//! CLI module - Command-line interface for the application.
//!
//! - `serve` - migrate, seed and start the HTTP server
//! - `migrate` - manual database migration control

pub mod args;

pub use args::{Cli, Commands};
