//! Service Container - Centralized service access.
//!
//! Every service shares one `Persistence` unit of work; handlers only see
//! the service traits.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::{
    AnimalManager, AnimalService, AnimalTypeManager, AnimalTypeService, AuthService,
    Authenticator, BreedManager, BreedService, UserManager, UserService, WeightingManager,
    WeightingService,
};
use crate::config::Config;
use crate::infra::Persistence;
use crate::notifications::{LogMailer, Notifier};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn animal_types(&self) -> Arc<dyn AnimalTypeService>;

    fn breeds(&self) -> Arc<dyn BreedService>;

    fn animals(&self) -> Arc<dyn AnimalService>;

    fn weightings(&self) -> Arc<dyn WeightingService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    animal_type_service: Arc<dyn AnimalTypeService>,
    breed_service: Arc<dyn BreedService>,
    animal_service: Arc<dyn AnimalService>,
    weighting_service: Arc<dyn WeightingService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        animal_type_service: Arc<dyn AnimalTypeService>,
        breed_service: Arc<dyn BreedService>,
        animal_service: Arc<dyn AnimalService>,
        weighting_service: Arc<dyn WeightingService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            animal_type_service,
            breed_service,
            animal_service,
            weighting_service,
        }
    }

    /// Wire every service against the database, logging outgoing mail.
    pub fn from_connection(db: DatabaseConnection, config: Config) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(LogMailer::new(config.mail_from.clone()));
        Self::with_notifier(db, config, notifier)
    }

    pub fn with_notifier(
        db: DatabaseConnection,
        config: Config,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), notifier, config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            animal_type_service: Arc::new(AnimalTypeManager::new(uow.clone())),
            breed_service: Arc::new(BreedManager::new(uow.clone())),
            animal_service: Arc::new(AnimalManager::new(uow.clone())),
            weighting_service: Arc::new(WeightingManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn animal_types(&self) -> Arc<dyn AnimalTypeService> {
        self.animal_type_service.clone()
    }

    fn breeds(&self) -> Arc<dyn BreedService> {
        self.breed_service.clone()
    }

    fn animals(&self) -> Arc<dyn AnimalService> {
        self.animal_service.clone()
    }

    fn weightings(&self) -> Arc<dyn WeightingService> {
        self.weighting_service.clone()
    }
}
