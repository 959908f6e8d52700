//! Breed repository. Read paths join the owning animal type for its name.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::animal_type::Entity as AnimalTypeEntity;
use super::entities::breed::{self, ActiveModel, Entity as BreedEntity};
use crate::domain::{Breed, NewBreed};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BreedRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Breed>>;

    async fn list_by_animal_type(&self, animal_type_id: i32) -> AppResult<Vec<Breed>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Breed>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Number of breeds referencing an animal type
    async fn count_by_animal_type(&self, animal_type_id: i32) -> AppResult<u64>;

    async fn create(&self, breed: NewBreed) -> AppResult<Breed>;

    async fn update(&self, breed: Breed) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct BreedStore {
    db: DatabaseConnection,
}

impl BreedStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BreedRepository for BreedStore {
    async fn list(&self) -> AppResult<Vec<Breed>> {
        let rows = BreedEntity::find()
            .find_also_related(AnimalTypeEntity)
            .order_by_asc(breed::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, animal_type)| model.into_domain(animal_type))
            .collect())
    }

    async fn list_by_animal_type(&self, animal_type_id: i32) -> AppResult<Vec<Breed>> {
        let rows = BreedEntity::find()
            .filter(breed::Column::AnimalTypeId.eq(animal_type_id))
            .find_also_related(AnimalTypeEntity)
            .order_by_asc(breed::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, animal_type)| model.into_domain(animal_type))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Breed>> {
        let row = BreedEntity::find_by_id(id)
            .find_also_related(AnimalTypeEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(model, animal_type)| model.into_domain(animal_type)))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = BreedEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn count_by_animal_type(&self, animal_type_id: i32) -> AppResult<u64> {
        let count = BreedEntity::find()
            .filter(breed::Column::AnimalTypeId.eq(animal_type_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn create(&self, breed: NewBreed) -> AppResult<Breed> {
        let active_model = ActiveModel {
            name: Set(breed.name),
            animal_type_id: Set(breed.animal_type_id),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(model.into_domain(None))
    }

    async fn update(&self, breed: Breed) -> AppResult<()> {
        let active_model = ActiveModel {
            id: Set(breed.id),
            name: Set(breed.name),
            animal_type_id: Set(breed.animal_type_id),
        };

        active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        BreedEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
