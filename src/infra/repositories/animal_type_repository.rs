//! Animal type repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::animal_type::{self, ActiveModel, Entity as AnimalTypeEntity};
use crate::domain::AnimalType;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnimalTypeRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<AnimalType>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<AnimalType>>;

    /// Exact, case-sensitive name match
    async fn find_by_name(&self, name: &str) -> AppResult<Option<AnimalType>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    async fn create(&self, name: String) -> AppResult<AnimalType>;

    async fn update(&self, animal_type: AnimalType) -> AppResult<AnimalType>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct AnimalTypeStore {
    db: DatabaseConnection,
}

impl AnimalTypeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnimalTypeRepository for AnimalTypeStore {
    async fn list(&self) -> AppResult<Vec<AnimalType>> {
        let models = AnimalTypeEntity::find()
            .order_by_asc(animal_type::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(AnimalType::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<AnimalType>> {
        let result = AnimalTypeEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(AnimalType::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<AnimalType>> {
        let result = AnimalTypeEntity::find()
            .filter(animal_type::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(result.map(AnimalType::from))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn create(&self, name: String) -> AppResult<AnimalType> {
        let active_model = ActiveModel {
            name: Set(name),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(AnimalType::from(model))
    }

    async fn update(&self, animal_type: AnimalType) -> AppResult<AnimalType> {
        let active_model = ActiveModel {
            id: Set(animal_type.id),
            name: Set(animal_type.name),
        };

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(AnimalType::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        AnimalTypeEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
