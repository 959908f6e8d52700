//! Animal handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AnimalInput, AnimalResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

pub fn animal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_animals).post(create_animal))
        .route(
            "/:id",
            get(get_animal).put(update_animal).delete(delete_animal),
        )
}

#[utoipa::path(
    get,
    path = "/api/animals",
    tag = "Animals",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All animals", body = Vec<AnimalResponse>))
)]
pub async fn list_animals(State(state): State<AppState>) -> AppResult<Json<Vec<AnimalResponse>>> {
    Ok(Json(state.animal_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/animals/{id}",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 200, description = "Animal found", body = AnimalResponse),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AnimalResponse>> {
    state
        .animal_service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Animal with id {} not found.", id)))
}

#[utoipa::path(
    post,
    path = "/api/animals",
    tag = "Animals",
    security(("bearer_auth" = [])),
    request_body = AnimalInput,
    responses(
        (status = 201, description = "Animal created", body = AnimalResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Breed or parent animal not found"),
        (status = 409, description = "Inventory number already in use")
    )
)]
pub async fn create_animal(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AnimalInput>,
) -> AppResult<Created<AnimalResponse>> {
    Ok(Created(state.animal_service.create(payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/animals/{id}",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Animal ID")),
    request_body = AnimalInput,
    responses(
        (status = 200, description = "Animal updated", body = AnimalResponse),
        (status = 404, description = "Animal, breed or parent not found"),
        (status = 409, description = "Inventory number already in use")
    )
)]
pub async fn update_animal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AnimalInput>,
) -> AppResult<Json<AnimalResponse>> {
    Ok(Json(state.animal_service.update(id, payload).await?))
}

/// Deleting an animal also removes its weightings
#[utoipa::path(
    delete,
    path = "/api/animals/{id}",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 204, description = "Animal deleted"),
        (status = 404, description = "Animal not found"),
        (status = 409, description = "Animal is the parent of other animals")
    )
)]
pub async fn delete_animal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.animal_service.delete(id).await?;
    Ok(NoContent)
}
