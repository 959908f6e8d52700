//! Weighting database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Weighting;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "weightings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub animal_id: i32,
    pub user_id: Uuid,
    pub date: Date,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub weight_kg: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_delete = "Cascade"
    )]
    Animal,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self, animal: Option<super::animal::Model>) -> Weighting {
        Weighting {
            id: self.id,
            animal_id: self.animal_id,
            user_id: self.user_id,
            date: self.date,
            weight_kg: self.weight_kg,
            animal_name: animal.map(|a| a.name),
        }
    }
}
