//! Animal type handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AnimalType, AnimalTypeInput};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

pub fn animal_type_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_animal_types).post(create_animal_type))
        .route(
            "/:id",
            get(get_animal_type)
                .put(update_animal_type)
                .delete(delete_animal_type),
        )
}

#[utoipa::path(
    get,
    path = "/api/animaltypes",
    tag = "Animal types",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All animal types", body = Vec<AnimalType>))
)]
pub async fn list_animal_types(State(state): State<AppState>) -> AppResult<Json<Vec<AnimalType>>> {
    Ok(Json(state.animal_type_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/animaltypes/{id}",
    tag = "Animal types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Animal type ID")),
    responses(
        (status = 200, description = "Animal type found", body = AnimalType),
        (status = 404, description = "Animal type not found")
    )
)]
pub async fn get_animal_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AnimalType>> {
    state
        .animal_type_service
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Animal type with id {} not found.", id)))
}

#[utoipa::path(
    post,
    path = "/api/animaltypes",
    tag = "Animal types",
    security(("bearer_auth" = [])),
    request_body = AnimalTypeInput,
    responses(
        (status = 201, description = "Animal type created", body = AnimalType),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_animal_type(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AnimalTypeInput>,
) -> AppResult<Created<AnimalType>> {
    let created = state.animal_type_service.create(payload).await?;
    Ok(Created(created))
}

#[utoipa::path(
    put,
    path = "/api/animaltypes/{id}",
    tag = "Animal types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Animal type ID")),
    request_body = AnimalTypeInput,
    responses(
        (status = 200, description = "Animal type updated", body = AnimalType),
        (status = 404, description = "Animal type not found"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn update_animal_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AnimalTypeInput>,
) -> AppResult<Json<AnimalType>> {
    Ok(Json(state.animal_type_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/animaltypes/{id}",
    tag = "Animal types",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Animal type ID")),
    responses(
        (status = 204, description = "Animal type deleted"),
        (status = 404, description = "Animal type not found"),
        (status = 409, description = "Breeds still reference the type")
    )
)]
pub async fn delete_animal_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.animal_type_service.delete(id).await?;
    Ok(NoContent)
}
