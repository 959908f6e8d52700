//! Animal type service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{validate_input, AnimalType, AnimalTypeInput};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AnimalTypeService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<AnimalType>>;

    /// `None` when no animal type has this id
    async fn get(&self, id: i32) -> AppResult<Option<AnimalType>>;

    async fn create(&self, input: AnimalTypeInput) -> AppResult<AnimalType>;

    async fn update(&self, id: i32, input: AnimalTypeInput) -> AppResult<AnimalType>;

    /// Fails with a conflict while breeds still reference the type
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub(crate) fn animal_type_not_found(id: i32) -> AppError {
    AppError::not_found(format!("Animal type with id {} not found.", id))
}

fn duplicate_name(name: &str) -> AppError {
    AppError::conflict(format!("Animal type with name '{}' already exists.", name))
}

pub struct AnimalTypeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AnimalTypeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AnimalTypeService for AnimalTypeManager<U> {
    async fn list(&self) -> AppResult<Vec<AnimalType>> {
        self.uow.animal_types().list().await
    }

    async fn get(&self, id: i32) -> AppResult<Option<AnimalType>> {
        self.uow.animal_types().find_by_id(id).await
    }

    async fn create(&self, input: AnimalTypeInput) -> AppResult<AnimalType> {
        validate_input(&input)?;
        let repo = self.uow.animal_types();

        if repo.find_by_name(&input.name).await?.is_some() {
            return Err(duplicate_name(&input.name));
        }

        let created = repo.create(input.name).await?;
        tracing::info!(animal_type_id = created.id, name = %created.name, "Animal type created");
        Ok(created)
    }

    async fn update(&self, id: i32, input: AnimalTypeInput) -> AppResult<AnimalType> {
        validate_input(&input)?;
        let repo = self.uow.animal_types();

        let mut animal_type = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| animal_type_not_found(id))?;

        if let Some(existing) = repo.find_by_name(&input.name).await? {
            if existing.id != id {
                return Err(duplicate_name(&input.name));
            }
        }

        animal_type.name = input.name;
        repo.update(animal_type).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let repo = self.uow.animal_types();
        let animal_type = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| animal_type_not_found(id))?;

        let breeds = self.uow.breeds().count_by_animal_type(id).await?;
        if breeds > 0 {
            return Err(AppError::conflict(format!(
                "Animal type '{}' cannot be deleted because {} breed(s) reference it.",
                animal_type.name, breeds
            )));
        }

        repo.delete(id).await?;
        tracing::info!(animal_type_id = id, "Animal type deleted");
        Ok(())
    }
}
