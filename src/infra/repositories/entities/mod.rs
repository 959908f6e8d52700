//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod account;
pub mod account_role;
pub mod animal;
pub mod animal_type;
pub mod breed;
pub mod weighting;
