//! Animal service.
//!
//! Inventory numbers are unique across the herd. Lineage is a single optional
//! parent reference; ancestry cycles are not checked.

use async_trait::async_trait;
use std::sync::Arc;

use super::breed_service::breed_not_found;
use crate::domain::{validate_input, Animal, AnimalInput, AnimalResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait AnimalService: Send + Sync {
    async fn list(&self) -> AppResult<Vec<AnimalResponse>>;

    async fn get(&self, id: i32) -> AppResult<Option<AnimalResponse>>;

    async fn create(&self, input: AnimalInput) -> AppResult<AnimalResponse>;

    async fn update(&self, id: i32, input: AnimalInput) -> AppResult<AnimalResponse>;

    /// Removes the animal with its weightings; refused while it is a parent.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub(crate) fn animal_not_found(id: i32) -> AppError {
    AppError::not_found(format!("Animal with id {} not found.", id))
}

pub struct AnimalManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AnimalManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Inventory number uniqueness, then breed and parent existence.
    async fn check_references(
        &self,
        input: &AnimalInput,
        current_id: Option<i32>,
    ) -> AppResult<()> {
        let animals = self.uow.animals();

        if let Some(existing) = animals
            .find_by_inventory_number(&input.inventory_number)
            .await?
        {
            if Some(existing.id) != current_id {
                return Err(AppError::conflict(format!(
                    "Animal with inventory number '{}' already exists.",
                    input.inventory_number
                )));
            }
        }

        if !self.uow.breeds().exists(input.breed_id).await? {
            return Err(breed_not_found(input.breed_id));
        }

        if let Some(parent_id) = input.parent_animal_id {
            if !animals.exists(parent_id).await? {
                return Err(AppError::not_found(format!(
                    "Parent animal with id {} not found.",
                    parent_id
                )));
            }
        }

        Ok(())
    }

    async fn reload(&self, id: i32) -> AppResult<AnimalResponse> {
        self.uow
            .animals()
            .find_by_id(id)
            .await?
            .map(AnimalResponse::from)
            .ok_or_else(|| animal_not_found(id))
    }
}

#[async_trait]
impl<U: UnitOfWork> AnimalService for AnimalManager<U> {
    async fn list(&self) -> AppResult<Vec<AnimalResponse>> {
        let animals = self.uow.animals().list().await?;
        Ok(animals.into_iter().map(AnimalResponse::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Option<AnimalResponse>> {
        let animal = self.uow.animals().find_by_id(id).await?;
        Ok(animal.map(AnimalResponse::from))
    }

    async fn create(&self, input: AnimalInput) -> AppResult<AnimalResponse> {
        validate_input(&input)?;
        self.check_references(&input, None).await?;

        let created = self.uow.animals().create(input.into_new_animal()?).await?;
        tracing::info!(
            animal_id = created.id,
            inventory_number = %created.inventory_number,
            "Animal created"
        );

        self.reload(created.id).await
    }

    async fn update(&self, id: i32, input: AnimalInput) -> AppResult<AnimalResponse> {
        validate_input(&input)?;

        if !self.uow.animals().exists(id).await? {
            return Err(animal_not_found(id));
        }
        self.check_references(&input, Some(id)).await?;

        let changes = input.into_new_animal()?;
        let animal = Animal {
            id,
            inventory_number: changes.inventory_number,
            gender: changes.gender,
            name: changes.name,
            arrival_date: changes.arrival_date,
            arrival_age_months: changes.arrival_age_months,
            breed_id: changes.breed_id,
            parent_animal_id: changes.parent_animal_id,
            breed_name: None,
            parent_animal_name: None,
        };
        self.uow.animals().update(animal).await?;

        self.reload(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let animals = self.uow.animals();
        if !animals.exists(id).await? {
            return Err(animal_not_found(id));
        }

        let children = animals.count_children(id).await?;
        if children > 0 {
            return Err(AppError::conflict(format!(
                "Animal with id {} cannot be deleted because {} animal(s) reference it as their parent.",
                id, children
            )));
        }

        animals.delete(id).await?;
        tracing::info!(animal_id = id, "Animal deleted");
        Ok(())
    }
}
