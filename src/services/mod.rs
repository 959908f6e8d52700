//! Application services layer - Use cases and business rules.
//!
//! Services validate input, enforce cross-entity invariants and ownership,
//! and map stored records to response shapes. Repository access goes through
//! the Unit of Work.

mod animal_service;
mod animal_type_service;
mod auth_service;
mod breed_service;
pub mod container;
mod user_service;
mod weighting_service;

#[cfg(test)]
pub(crate) mod tests;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use animal_service::{AnimalManager, AnimalService};
pub use animal_type_service::{AnimalTypeManager, AnimalTypeService};
pub use auth_service::{
    generate_token, verify_token, AuthService, Authenticator, Claims, REGISTRATION_MESSAGE,
};
pub use breed_service::{BreedManager, BreedService};
pub use user_service::{UserManager, UserService};
pub use weighting_service::{WeightingManager, WeightingService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
