//! Unit of Work - centralized repository access.
//!
//! Services depend on this trait rather than on individual stores, so a test
//! can swap every repository for a mock at once.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    AccountRepository, AccountStore, AnimalRepository, AnimalStore, AnimalTypeRepository,
    AnimalTypeStore, BreedRepository, BreedStore, IdentityLookup, WeightingRepository,
    WeightingStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn animal_types(&self) -> Arc<dyn AnimalTypeRepository>;

    fn breeds(&self) -> Arc<dyn BreedRepository>;

    fn animals(&self) -> Arc<dyn AnimalRepository>;

    fn weightings(&self) -> Arc<dyn WeightingRepository>;

    fn accounts(&self) -> Arc<dyn AccountRepository>;

    fn identities(&self) -> Arc<dyn IdentityLookup>;
}

/// Database-backed Unit of Work.
pub struct Persistence {
    animal_types: Arc<AnimalTypeStore>,
    breeds: Arc<BreedStore>,
    animals: Arc<AnimalStore>,
    weightings: Arc<WeightingStore>,
    accounts: Arc<AccountStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            animal_types: Arc::new(AnimalTypeStore::new(db.clone())),
            breeds: Arc::new(BreedStore::new(db.clone())),
            animals: Arc::new(AnimalStore::new(db.clone())),
            weightings: Arc::new(WeightingStore::new(db.clone())),
            accounts: Arc::new(AccountStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn animal_types(&self) -> Arc<dyn AnimalTypeRepository> {
        self.animal_types.clone()
    }

    fn breeds(&self) -> Arc<dyn BreedRepository> {
        self.breeds.clone()
    }

    fn animals(&self) -> Arc<dyn AnimalRepository> {
        self.animals.clone()
    }

    fn weightings(&self) -> Arc<dyn WeightingRepository> {
        self.weightings.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.accounts.clone()
    }

    fn identities(&self) -> Arc<dyn IdentityLookup> {
        self.accounts.clone()
    }
}
