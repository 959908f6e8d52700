//! Breed handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{BreedInput, BreedResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

pub fn breed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_breeds).post(create_breed))
        .route("/by-animal-type/:animal_type_id", get(list_breeds_by_animal_type))
        .route(
            "/:id",
            get(get_breed).put(update_breed).delete(delete_breed),
        )
}

#[utoipa::path(
    get,
    path = "/api/breeds",
    tag = "Breeds",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All breeds", body = Vec<BreedResponse>))
)]
pub async fn list_breeds(State(state): State<AppState>) -> AppResult<Json<Vec<BreedResponse>>> {
    Ok(Json(state.breed_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/breeds/by-animal-type/{animal_type_id}",
    tag = "Breeds",
    security(("bearer_auth" = [])),
    params(("animal_type_id" = i32, Path, description = "Animal type ID")),
    responses((status = 200, description = "Breeds of the animal type", body = Vec<BreedResponse>))
)]
pub async fn list_breeds_by_animal_type(
    State(state): State<AppState>,
    Path(animal_type_id): Path<i32>,
) -> AppResult<Json<Vec<BreedResponse>>> {
    Ok(Json(
        state.breed_service.list_by_animal_type(animal_type_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/breeds/{id}",
    tag = "Breeds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Breed ID")),
    responses(
        (status = 200, description = "Breed found", body = BreedResponse),
        (status = 404, description = "Breed not found")
    )
)]
pub async fn get_breed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BreedResponse>> {
    state
        .breed_service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Breed with id {} not found.", id)))
}

#[utoipa::path(
    post,
    path = "/api/breeds",
    tag = "Breeds",
    security(("bearer_auth" = [])),
    request_body = BreedInput,
    responses(
        (status = 201, description = "Breed created", body = BreedResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Animal type not found")
    )
)]
pub async fn create_breed(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BreedInput>,
) -> AppResult<Created<BreedResponse>> {
    Ok(Created(state.breed_service.create(payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/breeds/{id}",
    tag = "Breeds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Breed ID")),
    request_body = BreedInput,
    responses(
        (status = 200, description = "Breed updated", body = BreedResponse),
        (status = 404, description = "Breed or animal type not found")
    )
)]
pub async fn update_breed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<BreedInput>,
) -> AppResult<Json<BreedResponse>> {
    Ok(Json(state.breed_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/breeds/{id}",
    tag = "Breeds",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Breed ID")),
    responses(
        (status = 204, description = "Breed deleted"),
        (status = 404, description = "Breed not found"),
        (status = 409, description = "Animals still reference the breed")
    )
)]
pub async fn delete_breed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.breed_service.delete(id).await?;
    Ok(NoContent)
}
