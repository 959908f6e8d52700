//! Migration: animal types, breeds, animals and weightings.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AnimalTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnimalTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnimalTypes::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Breeds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Breeds::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Breeds::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Breeds::AnimalTypeId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_breeds_animal_type")
                            .from(Breeds::Table, Breeds::AnimalTypeId)
                            .to(AnimalTypes::Table, AnimalTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Animals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Animals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Animals::InventoryNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Animals::Gender).string_len(10).not_null())
                    .col(ColumnDef::new(Animals::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Animals::ArrivalDate).date().not_null())
                    .col(ColumnDef::new(Animals::ArrivalAgeMonths).integer().not_null())
                    .col(ColumnDef::new(Animals::BreedId).integer().not_null())
                    .col(ColumnDef::new(Animals::ParentAnimalId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_animals_breed")
                            .from(Animals::Table, Animals::BreedId)
                            .to(Breeds::Table, Breeds::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_animals_parent")
                            .from(Animals::Table, Animals::ParentAnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Weightings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Weightings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Weightings::AnimalId).integer().not_null())
                    .col(ColumnDef::new(Weightings::UserId).uuid().not_null())
                    .col(ColumnDef::new(Weightings::Date).date().not_null())
                    .col(
                        ColumnDef::new(Weightings::WeightKg)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_weightings_animal")
                            .from(Weightings::Table, Weightings::AnimalId)
                            .to(Animals::Table, Animals::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One weighting per animal per calendar day
        manager
            .create_index(
                Index::create()
                    .name("idx_weightings_animal_date")
                    .table(Weightings::Table)
                    .col(Weightings::AnimalId)
                    .col(Weightings::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_weightings_user_id")
                    .table(Weightings::Table)
                    .col(Weightings::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Weightings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Animals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Breeds::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimalTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AnimalTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Breeds {
    Table,
    Id,
    Name,
    AnimalTypeId,
}

#[derive(DeriveIden)]
enum Animals {
    Table,
    Id,
    InventoryNumber,
    Gender,
    Name,
    ArrivalDate,
    ArrivalAgeMonths,
    BreedId,
    ParentAnimalId,
}

#[derive(DeriveIden)]
enum Weightings {
    Table,
    Id,
    AnimalId,
    UserId,
    Date,
    WeightKg,
}
