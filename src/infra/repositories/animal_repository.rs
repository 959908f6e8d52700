//! Animal repository.
//!
//! Read paths join the breed and resolve parent names with a single extra
//! lookup; the lineage itself is kept as a plain foreign key.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::animal::{self, ActiveModel, Entity as AnimalEntity};
use super::entities::breed::{self, Entity as BreedEntity};
use crate::domain::{Animal, NewAnimal};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AnimalRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Animal>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Animal>>;

    async fn find_by_inventory_number(&self, inventory_number: &str)
        -> AppResult<Option<Animal>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Number of animals of a breed
    async fn count_by_breed(&self, breed_id: i32) -> AppResult<u64>;

    /// Number of animals naming `id` as their parent
    async fn count_children(&self, id: i32) -> AppResult<u64>;

    async fn create(&self, animal: NewAnimal) -> AppResult<Animal>;

    async fn update(&self, animal: Animal) -> AppResult<()>;

    /// Delete an animal; its weightings go with it
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct AnimalStore {
    db: DatabaseConnection,
}

impl AnimalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn resolve_names(
        &self,
        rows: Vec<(animal::Model, Option<breed::Model>)>,
    ) -> AppResult<Vec<Animal>> {
        let mut parent_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(model, _)| model.parent_animal_id)
            .collect();
        parent_ids.sort_unstable();
        parent_ids.dedup();

        let parent_names: HashMap<i32, String> = if parent_ids.is_empty() {
            HashMap::new()
        } else {
            AnimalEntity::find()
                .filter(animal::Column::Id.is_in(parent_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|parent| (parent.id, parent.name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(model, breed)| {
                let parent_name = model
                    .parent_animal_id
                    .and_then(|id| parent_names.get(&id).cloned());
                model.into_domain(breed.map(|b| b.name), parent_name)
            })
            .collect())
    }
}

#[async_trait]
impl AnimalRepository for AnimalStore {
    async fn list(&self) -> AppResult<Vec<Animal>> {
        let rows = AnimalEntity::find()
            .find_also_related(BreedEntity)
            .order_by_asc(animal::Column::InventoryNumber)
            .all(&self.db)
            .await?;

        self.resolve_names(rows).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Animal>> {
        let row = AnimalEntity::find_by_id(id)
            .find_also_related(BreedEntity)
            .one(&self.db)
            .await?;

        match row {
            Some(row) => Ok(self.resolve_names(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_inventory_number(
        &self,
        inventory_number: &str,
    ) -> AppResult<Option<Animal>> {
        let result = AnimalEntity::find()
            .filter(animal::Column::InventoryNumber.eq(inventory_number))
            .one(&self.db)
            .await?;

        Ok(result.map(|model| model.into_domain(None, None)))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = AnimalEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn count_by_breed(&self, breed_id: i32) -> AppResult<u64> {
        let count = AnimalEntity::find()
            .filter(animal::Column::BreedId.eq(breed_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn count_children(&self, id: i32) -> AppResult<u64> {
        let count = AnimalEntity::find()
            .filter(animal::Column::ParentAnimalId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn create(&self, animal: NewAnimal) -> AppResult<Animal> {
        let active_model = ActiveModel {
            inventory_number: Set(animal.inventory_number),
            gender: Set(animal.gender.to_string()),
            name: Set(animal.name),
            arrival_date: Set(animal.arrival_date),
            arrival_age_months: Set(animal.arrival_age_months),
            breed_id: Set(animal.breed_id),
            parent_animal_id: Set(animal.parent_animal_id),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(model.into_domain(None, None))
    }

    async fn update(&self, animal: Animal) -> AppResult<()> {
        let active_model = ActiveModel {
            id: Set(animal.id),
            inventory_number: Set(animal.inventory_number),
            gender: Set(animal.gender.to_string()),
            name: Set(animal.name),
            arrival_date: Set(animal.arrival_date),
            arrival_age_months: Set(animal.arrival_age_months),
            breed_id: Set(animal.breed_id),
            parent_animal_id: Set(animal.parent_animal_id),
        };

        active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        AnimalEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
