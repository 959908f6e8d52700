//! Shared HTTP response helpers.

pub mod response;

pub use response::{Created, MessageResponse, NoContent};
