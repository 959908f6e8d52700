//! Weight measurements, owned by the account that recorded them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::WEIGHT_DECIMAL_PLACES;
use crate::domain::validation::{date_input, positive_weight};

/// Stored weighting; `animal_name` is only resolved on read paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighting {
    pub id: i32,
    pub animal_id: i32,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight_kg: Decimal,
    pub animal_name: Option<String>,
}

impl Weighting {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewWeighting {
    pub animal_id: i32,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight_kg: Decimal,
}

/// Payload for creating or updating a weighting. The owner is never part of it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeightingInput {
    #[validate(range(min = 1, message = "AnimalId must be a positive number."))]
    pub animal_id: i32,
    #[serde(deserialize_with = "date_input::deserialize")]
    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "positive_weight"))]
    #[schema(value_type = f64, example = 412.5)]
    pub weight_kg: Decimal,
}

impl WeightingInput {
    /// Weight rounded to the stored precision.
    pub fn normalized_weight(&self) -> Decimal {
        self.weight_kg.round_dp(WEIGHT_DECIMAL_PLACES)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeightingResponse {
    pub id: i32,
    pub animal_id: i32,
    pub animal_name: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weight_kg: Decimal,
}

impl WeightingResponse {
    pub fn new(weighting: Weighting, user_name: String) -> Self {
        Self {
            id: weighting.id,
            animal_id: weighting.animal_id,
            animal_name: weighting.animal_name.unwrap_or_default(),
            user_id: weighting.user_id,
            user_name,
            date: weighting.date,
            weight_kg: weighting.weight_kg,
        }
    }
}
