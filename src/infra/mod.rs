//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and seeding
//! - Repositories over SeaORM entities
//! - Unit of Work for repository access

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    AccountRepository, AccountStore, AnimalRepository, AnimalStore, AnimalTypeRepository,
    AnimalTypeStore, BreedRepository, BreedStore, IdentityLookup, WeightingRepository,
    WeightingStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAccountRepository, MockAnimalRepository, MockAnimalTypeRepository, MockBreedRepository,
    MockIdentityLookup, MockWeightingRepository,
};
