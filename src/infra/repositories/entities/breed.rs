//! Breed database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Breed;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "breeds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub animal_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animal_type::Entity",
        from = "Column::AnimalTypeId",
        to = "super::animal_type::Column::Id",
        on_delete = "Restrict"
    )]
    AnimalType,
    #[sea_orm(has_many = "super::animal::Entity")]
    Animals,
}

impl Related<super::animal_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimalType.def()
    }
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain record, attaching the joined type name if loaded.
    pub fn into_domain(self, animal_type: Option<super::animal_type::Model>) -> Breed {
        Breed {
            id: self.id,
            name: self.name,
            animal_type_id: self.animal_type_id,
            animal_type_name: animal_type.map(|t| t.name),
        }
    }
}
