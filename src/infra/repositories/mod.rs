//! Repository layer - Data access abstraction
//!
//! One repository per persisted entity plus the credential store. Repositories
//! only move data; business rules live in the services.

mod account_repository;
mod animal_repository;
mod animal_type_repository;
mod breed_repository;
pub(crate) mod entities;
mod weighting_repository;

pub use account_repository::{AccountRepository, AccountStore, IdentityLookup};
pub use animal_repository::{AnimalRepository, AnimalStore};
pub use animal_type_repository::{AnimalTypeRepository, AnimalTypeStore};
pub use breed_repository::{BreedRepository, BreedStore};
pub use weighting_repository::{WeightingRepository, WeightingStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::{MockAccountRepository, MockIdentityLookup};
#[cfg(any(test, feature = "test-utils"))]
pub use animal_repository::MockAnimalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use animal_type_repository::MockAnimalTypeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use breed_repository::MockBreedRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use weighting_repository::MockWeightingRepository;
