//! Animal database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Animal, Gender};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub inventory_number: String,
    pub gender: String,
    pub name: String,
    pub arrival_date: Date,
    pub arrival_age_months: i32,
    pub breed_id: i32,
    pub parent_animal_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::breed::Entity",
        from = "Column::BreedId",
        to = "super::breed::Column::Id",
        on_delete = "Restrict"
    )]
    Breed,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentAnimalId",
        to = "Column::Id",
        on_delete = "Restrict"
    )]
    Parent,
    #[sea_orm(has_many = "super::weighting::Entity")]
    Weightings,
}

impl Related<super::breed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Breed.def()
    }
}

impl Related<super::weighting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weightings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain record with whatever related names were resolved.
    pub fn into_domain(
        self,
        breed_name: Option<String>,
        parent_animal_name: Option<String>,
    ) -> Animal {
        let gender = match self.gender.as_str() {
            "Female" => Gender::Female,
            _ => Gender::Male,
        };

        Animal {
            id: self.id,
            inventory_number: self.inventory_number,
            gender,
            name: self.name,
            arrival_date: self.arrival_date,
            arrival_age_months: self.arrival_age_months,
            breed_id: self.breed_id,
            parent_animal_id: self.parent_animal_id,
            breed_name,
            parent_animal_name,
        }
    }
}
