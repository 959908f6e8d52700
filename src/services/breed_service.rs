//! Breed service.

use async_trait::async_trait;
use std::sync::Arc;

use super::animal_type_service::animal_type_not_found;
use crate::domain::{validate_input, BreedInput, BreedResponse, NewBreed};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait BreedService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<BreedResponse>>;

    async fn list_by_animal_type(&self, animal_type_id: i32) -> AppResult<Vec<BreedResponse>>;

    async fn get(&self, id: i32) -> AppResult<Option<BreedResponse>>;

    async fn create(&self, input: BreedInput) -> AppResult<BreedResponse>;

    async fn update(&self, id: i32, input: BreedInput) -> AppResult<BreedResponse>;

    /// Fails with a conflict while animals still reference the breed
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub(crate) fn breed_not_found(id: i32) -> AppError {
    AppError::not_found(format!("Breed with id {} not found.", id))
}

pub struct BreedManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BreedManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_animal_type(&self, animal_type_id: i32) -> AppResult<()> {
        if !self.uow.animal_types().exists(animal_type_id).await? {
            return Err(animal_type_not_found(animal_type_id));
        }
        Ok(())
    }

    /// Re-read after a write so the joined type name is populated.
    async fn reload(&self, id: i32) -> AppResult<BreedResponse> {
        self.uow
            .breeds()
            .find_by_id(id)
            .await?
            .map(BreedResponse::from)
            .ok_or_else(|| breed_not_found(id))
    }
}

#[async_trait]
impl<U: UnitOfWork> BreedService for BreedManager<U> {
    async fn list(&self) -> AppResult<Vec<BreedResponse>> {
        let breeds = self.uow.breeds().list().await?;
        Ok(breeds.into_iter().map(BreedResponse::from).collect())
    }

    async fn list_by_animal_type(&self, animal_type_id: i32) -> AppResult<Vec<BreedResponse>> {
        let breeds = self.uow.breeds().list_by_animal_type(animal_type_id).await?;
        Ok(breeds.into_iter().map(BreedResponse::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Option<BreedResponse>> {
        let breed = self.uow.breeds().find_by_id(id).await?;
        Ok(breed.map(BreedResponse::from))
    }

    async fn create(&self, input: BreedInput) -> AppResult<BreedResponse> {
        validate_input(&input)?;
        self.ensure_animal_type(input.animal_type_id).await?;

        let created = self
            .uow
            .breeds()
            .create(NewBreed {
                name: input.name,
                animal_type_id: input.animal_type_id,
            })
            .await?;

        tracing::info!(breed_id = created.id, "Breed created");
        self.reload(created.id).await
    }

    async fn update(&self, id: i32, input: BreedInput) -> AppResult<BreedResponse> {
        validate_input(&input)?;
        let repo = self.uow.breeds();

        let mut breed = repo.find_by_id(id).await?.ok_or_else(|| breed_not_found(id))?;
        self.ensure_animal_type(input.animal_type_id).await?;

        breed.name = input.name;
        breed.animal_type_id = input.animal_type_id;
        repo.update(breed).await?;

        self.reload(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let repo = self.uow.breeds();
        let breed = repo.find_by_id(id).await?.ok_or_else(|| breed_not_found(id))?;

        let animals = self.uow.animals().count_by_breed(id).await?;
        if animals > 0 {
            return Err(AppError::conflict(format!(
                "Breed '{}' cannot be deleted because {} animal(s) reference it.",
                breed.name, animals
            )));
        }

        repo.delete(id).await?;
        tracing::info!(breed_id = id, "Breed deleted");
        Ok(())
    }
}
