//! Weighting repository. Read paths join the weighed animal for its name.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::animal::Entity as AnimalEntity;
use super::entities::weighting::{self, ActiveModel, Entity as WeightingEntity};
use crate::domain::{NewWeighting, Weighting};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WeightingRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Weighting>>;

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Weighting>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Weighting>>;

    /// Whether another weighting exists for the animal on that calendar date.
    async fn exists_for_animal_on(
        &self,
        animal_id: i32,
        date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<bool>;

    async fn create(&self, weighting: NewWeighting) -> AppResult<Weighting>;

    /// Persist animal, date and weight; the owner column is never written.
    async fn update(&self, weighting: Weighting) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct WeightingStore {
    db: DatabaseConnection,
}

impl WeightingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeightingRepository for WeightingStore {
    async fn list(&self) -> AppResult<Vec<Weighting>> {
        let rows = WeightingEntity::find()
            .find_also_related(AnimalEntity)
            .order_by_desc(weighting::Column::Date)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, animal)| model.into_domain(animal))
            .collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Weighting>> {
        let rows = WeightingEntity::find()
            .filter(weighting::Column::UserId.eq(user_id))
            .find_also_related(AnimalEntity)
            .order_by_desc(weighting::Column::Date)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, animal)| model.into_domain(animal))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Weighting>> {
        let row = WeightingEntity::find_by_id(id)
            .find_also_related(AnimalEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(model, animal)| model.into_domain(animal)))
    }

    async fn exists_for_animal_on(
        &self,
        animal_id: i32,
        date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let mut query = WeightingEntity::find()
            .filter(weighting::Column::AnimalId.eq(animal_id))
            .filter(weighting::Column::Date.eq(date));

        if let Some(id) = exclude_id {
            query = query.filter(weighting::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    async fn create(&self, weighting: NewWeighting) -> AppResult<Weighting> {
        let active_model = ActiveModel {
            animal_id: Set(weighting.animal_id),
            user_id: Set(weighting.user_id),
            date: Set(weighting.date),
            weight_kg: Set(weighting.weight_kg),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(model.into_domain(None))
    }

    async fn update(&self, weighting: Weighting) -> AppResult<()> {
        let active_model = ActiveModel {
            id: Set(weighting.id),
            animal_id: Set(weighting.animal_id),
            date: Set(weighting.date),
            weight_kg: Set(weighting.weight_kg),
            ..Default::default()
        };

        active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        WeightingEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
