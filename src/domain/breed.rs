//! Breed records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::validation::not_blank;

/// Stored breed; `animal_type_name` is only resolved on read paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Breed {
    pub id: i32,
    pub name: String,
    pub animal_type_id: i32,
    pub animal_type_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBreed {
    pub name: String,
    pub animal_type_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreedInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Name must not exceed 100 characters.")
    )]
    #[schema(example = "Holstein", max_length = 100)]
    pub name: String,
    #[validate(range(min = 1, message = "AnimalTypeId must be a positive number."))]
    #[schema(example = 1)]
    pub animal_type_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreedResponse {
    pub id: i32,
    pub name: String,
    pub animal_type_id: i32,
    pub animal_type_name: String,
}

impl From<Breed> for BreedResponse {
    fn from(breed: Breed) -> Self {
        Self {
            id: breed.id,
            name: breed.name,
            animal_type_id: breed.animal_type_id,
            animal_type_name: breed.animal_type_name.unwrap_or_default(),
        }
    }
}
