//! Animal records with optional single-parent lineage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::validation::{date_input, gender, not_blank};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        match value {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            _ => Err(AppError::validation("Gender must be 'Male' or 'Female'.")),
        }
    }
}

/// Stored animal; breed and parent names are only resolved on read paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub id: i32,
    pub inventory_number: String,
    pub gender: Gender,
    pub name: String,
    pub arrival_date: NaiveDate,
    pub arrival_age_months: i32,
    pub breed_id: i32,
    pub parent_animal_id: Option<i32>,
    pub breed_name: Option<String>,
    pub parent_animal_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAnimal {
    pub inventory_number: String,
    pub gender: Gender,
    pub name: String,
    pub arrival_date: NaiveDate,
    pub arrival_age_months: i32,
    pub breed_id: i32,
    pub parent_animal_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "Inventory number must not exceed 50 characters.")
    )]
    #[schema(example = "INV-0001", max_length = 50)]
    pub inventory_number: String,
    #[validate(custom(function = "gender"))]
    #[schema(example = "Female")]
    pub gender: String,
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Name must not exceed 200 characters.")
    )]
    #[schema(example = "Daisy", max_length = 200)]
    pub name: String,
    #[serde(deserialize_with = "date_input::deserialize")]
    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub arrival_date: NaiveDate,
    #[validate(range(min = 0, message = "Arrival age must be non-negative."))]
    pub arrival_age_months: i32,
    #[validate(range(min = 1, message = "BreedId must be a positive number."))]
    pub breed_id: i32,
    #[serde(default)]
    #[validate(range(min = 1, message = "ParentAnimalId must be a positive number."))]
    pub parent_animal_id: Option<i32>,
}

impl AnimalInput {
    /// Convert a validated payload into a record to store.
    pub fn into_new_animal(self) -> AppResult<NewAnimal> {
        Ok(NewAnimal {
            gender: self.gender.parse()?,
            inventory_number: self.inventory_number,
            name: self.name,
            arrival_date: self.arrival_date,
            arrival_age_months: self.arrival_age_months,
            breed_id: self.breed_id,
            parent_animal_id: self.parent_animal_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalResponse {
    pub id: i32,
    pub inventory_number: String,
    pub gender: String,
    pub name: String,
    pub arrival_date: NaiveDate,
    pub arrival_age_months: i32,
    pub breed_id: i32,
    pub breed_name: String,
    pub parent_animal_id: Option<i32>,
    pub parent_animal_name: Option<String>,
}

impl From<Animal> for AnimalResponse {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            inventory_number: animal.inventory_number,
            gender: animal.gender.to_string(),
            name: animal.name,
            arrival_date: animal.arrival_date,
            arrival_age_months: animal.arrival_age_months,
            breed_id: animal.breed_id,
            breed_name: animal.breed_name.unwrap_or_default(),
            parent_animal_id: animal.parent_animal_id,
            parent_animal_name: animal.parent_animal_name,
        }
    }
}
