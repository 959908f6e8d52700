//! Domain layer - Core business entities and value objects.
//!
//! Holds the stored records, the request/response shapes exchanged with
//! clients and the validation rules they carry.

pub mod account;
pub mod animal;
pub mod animal_type;
pub mod breed;
pub mod password;
pub mod validation;
pub mod weighting;

pub use account::{
    Account, AccountResponse, AuthResponse, LoginRequest, NewAccount, RegisterRequest, Role,
};
pub use animal::{Animal, AnimalInput, AnimalResponse, Gender, NewAnimal};
pub use animal_type::{AnimalType, AnimalTypeInput};
pub use breed::{Breed, BreedInput, BreedResponse, NewBreed};
pub use password::Password;
pub use validation::validate_input;
pub use weighting::{NewWeighting, Weighting, WeightingInput, WeightingResponse};
