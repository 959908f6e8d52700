//! Animal type database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::AnimalType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "animal_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::breed::Entity")]
    Breeds,
}

impl Related<super::breed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Breeds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AnimalType {
    fn from(model: Model) -> Self {
        AnimalType {
            id: model.id,
            name: model.name,
        }
    }
}
