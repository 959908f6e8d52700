//! OpenAPI documentation configuration.
//!
//! Served as JSON at `/api-docs/openapi.json` and browsable through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    animal_handler, animal_type_handler, auth_handler, breed_handler, user_handler,
    weighting_handler,
};
use crate::domain::{
    AccountResponse, AnimalInput, AnimalResponse, AnimalType, AnimalTypeInput, AuthResponse,
    BreedInput, BreedResponse, Gender, LoginRequest, RegisterRequest, Role, WeightingInput,
    WeightingResponse,
};
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AnimalFarm API",
        version = "0.1.0",
        description = "Livestock records: animal types, breeds, animals and their weightings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::activate,
        animal_type_handler::list_animal_types,
        animal_type_handler::get_animal_type,
        animal_type_handler::create_animal_type,
        animal_type_handler::update_animal_type,
        animal_type_handler::delete_animal_type,
        breed_handler::list_breeds,
        breed_handler::list_breeds_by_animal_type,
        breed_handler::get_breed,
        breed_handler::create_breed,
        breed_handler::update_breed,
        breed_handler::delete_breed,
        animal_handler::list_animals,
        animal_handler::get_animal,
        animal_handler::create_animal,
        animal_handler::update_animal,
        animal_handler::delete_animal,
        weighting_handler::list_weightings,
        weighting_handler::list_weightings_by_user,
        weighting_handler::get_weighting,
        weighting_handler::create_weighting,
        weighting_handler::update_weighting,
        weighting_handler::delete_weighting,
        user_handler::list_users,
        user_handler::activate_user,
        user_handler::deactivate_user,
    ),
    components(
        schemas(
            Role,
            Gender,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            AccountResponse,
            MessageResponse,
            AnimalType,
            AnimalTypeInput,
            BreedInput,
            BreedResponse,
            AnimalInput,
            AnimalResponse,
            WeightingInput,
            WeightingResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, activation and login"),
        (name = "Animal types", description = "Species kept on the farm"),
        (name = "Breeds", description = "Breeds per animal type"),
        (name = "Animals", description = "Individual animals and their lineage"),
        (name = "Weightings", description = "Weight measurements owned by the recording account"),
        (name = "Users", description = "Account administration (Admin role)")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/auth/activate",
            "/api/animaltypes/{id}",
            "/api/breeds/by-animal-type/{animal_type_id}",
            "/api/animals",
            "/api/weightings/{id}",
            "/api/users/{id}/deactivate",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }
}
