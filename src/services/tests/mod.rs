//! Service unit tests against mocked repositories.


use chrono::NaiveDate;
use std::sync::Arc;

use crate::errors::AppError;
use crate::infra::repositories::{
    MockAccountRepository, MockAnimalRepository, MockAnimalTypeRepository, MockBreedRepository,
    MockIdentityLookup, MockWeightingRepository,
};
use crate::infra::{
    AccountRepository, AnimalRepository, AnimalTypeRepository, BreedRepository, IdentityLookup,
    UnitOfWork, WeightingRepository,
};

/// Unit of work wired from individual mocks; unset repositories panic when used.
pub(crate) struct TestUnitOfWork {
    animal_types: Arc<dyn AnimalTypeRepository>,
    breeds: Arc<dyn BreedRepository>,
    animals: Arc<dyn AnimalRepository>,
    weightings: Arc<dyn WeightingRepository>,
    accounts: Arc<dyn AccountRepository>,
    identities: Arc<dyn IdentityLookup>,
}

impl Default for TestUnitOfWork {
    fn default() -> Self {
        Self {
            animal_types: Arc::new(MockAnimalTypeRepository::new()),
            breeds: Arc::new(MockBreedRepository::new()),
            animals: Arc::new(MockAnimalRepository::new()),
            weightings: Arc::new(MockWeightingRepository::new()),
            accounts: Arc::new(MockAccountRepository::new()),
            identities: Arc::new(MockIdentityLookup::new()),
        }
    }
}

impl TestUnitOfWork {
    pub fn with_animal_types(mut self, repo: MockAnimalTypeRepository) -> Self {
        self.animal_types = Arc::new(repo);
        self
    }

    pub fn with_breeds(mut self, repo: MockBreedRepository) -> Self {
        self.breeds = Arc::new(repo);
        self
    }

    pub fn with_animals(mut self, repo: MockAnimalRepository) -> Self {
        self.animals = Arc::new(repo);
        self
    }

    pub fn with_weightings(mut self, repo: MockWeightingRepository) -> Self {
        self.weightings = Arc::new(repo);
        self
    }

    pub fn with_accounts(mut self, repo: impl AccountRepository + 'static) -> Self {
        self.accounts = Arc::new(repo);
        self
    }

    pub fn with_identities(mut self, lookup: MockIdentityLookup) -> Self {
        self.identities = Arc::new(lookup);
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl UnitOfWork for TestUnitOfWork {
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
        self.identities.clone()
    }
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(super) fn validation_messages(err: AppError) -> Vec<String> {
    match err {
        AppError::Validation(messages) => messages,
        other => panic!("expected validation error, got {:?}", other),
    }
}
