//! Animal type (species) records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalType {
    pub id: i32,
    #[schema(example = "Bovine")]
    pub name: String,
}

/// Payload for creating or updating an animal type.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalTypeInput {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Name must not exceed 100 characters.")
    )]
    #[schema(example = "Bovine", max_length = 100)]
    pub name: String,
}
