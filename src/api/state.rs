//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AnimalService, AnimalTypeService, AuthService, BreedService, ServiceContainer, Services,
    UserService, WeightingService,
};

/// Services and infrastructure shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub animal_type_service: Arc<dyn AnimalTypeService>,
    pub breed_service: Arc<dyn BreedService>,
    pub animal_service: Arc<dyn AnimalService>,
    pub weighting_service: Arc<dyn WeightingService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the production services against `database`.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::new(&services, database)
    }

    /// Build state from any service container.
    pub fn new(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            animal_type_service: services.animal_types(),
            breed_service: services.breeds(),
            animal_service: services.animals(),
            weighting_service: services.weightings(),
            database,
        }
    }
}
