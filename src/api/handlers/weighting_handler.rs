//! Weighting handlers. Every operation runs as the authenticated caller.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{WeightingInput, WeightingResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

pub fn weighting_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_weightings).post(create_weighting))
        .route("/by-user/:user_id", get(list_weightings_by_user))
        .route(
            "/:id",
            get(get_weighting)
                .put(update_weighting)
                .delete(delete_weighting),
        )
}

/// Admins get every weighting, other callers only their own
#[utoipa::path(
    get,
    path = "/api/weightings",
    tag = "Weightings",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Visible weightings", body = Vec<WeightingResponse>))
)]
pub async fn list_weightings(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeightingResponse>>> {
    Ok(Json(state.weighting_service.list(current_user.id).await?))
}

/// Weightings recorded by one account; callers may list their own, admins any
#[utoipa::path(
    get,
    path = "/api/weightings/by-user/{user_id}",
    tag = "Weightings",
    security(("bearer_auth" = [])),
    params(("user_id" = Uuid, Path, description = "Owning account ID")),
    responses(
        (status = 200, description = "Weightings of the account", body = Vec<WeightingResponse>),
        (status = 403, description = "Another account's records without the Admin role")
    )
)]
pub async fn list_weightings_by_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<WeightingResponse>>> {
    let weightings = state
        .weighting_service
        .list_by_user(user_id, current_user.id)
        .await?;
    Ok(Json(weightings))
}

#[utoipa::path(
    get,
    path = "/api/weightings/{id}",
    tag = "Weightings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Weighting ID")),
    responses(
        (status = 200, description = "Weighting found", body = WeightingResponse),
        (status = 401, description = "Weighting belongs to another account"),
        (status = 404, description = "Weighting not found")
    )
)]
pub async fn get_weighting(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<WeightingResponse>> {
    state
        .weighting_service
        .get(id, current_user.id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Weighting with id {} not found.", id)))
}

#[utoipa::path(
    post,
    path = "/api/weightings",
    tag = "Weightings",
    security(("bearer_auth" = [])),
    request_body = WeightingInput,
    responses(
        (status = 201, description = "Weighting recorded", body = WeightingResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Animal not found"),
        (status = 409, description = "Animal already weighed on that date")
    )
)]
pub async fn create_weighting(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WeightingInput>,
) -> AppResult<Created<WeightingResponse>> {
    let created = state
        .weighting_service
        .create(payload, current_user.id)
        .await?;
    Ok(Created(created))
}

#[utoipa::path(
    put,
    path = "/api/weightings/{id}",
    tag = "Weightings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Weighting ID")),
    request_body = WeightingInput,
    responses(
        (status = 200, description = "Weighting updated", body = WeightingResponse),
        (status = 401, description = "Weighting belongs to another account"),
        (status = 404, description = "Weighting or animal not found"),
        (status = 409, description = "Animal already weighed on that date")
    )
)]
pub async fn update_weighting(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<WeightingInput>,
) -> AppResult<Json<WeightingResponse>> {
    let updated = state
        .weighting_service
        .update(id, payload, current_user.id)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/weightings/{id}",
    tag = "Weightings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Weighting ID")),
    responses(
        (status = 204, description = "Weighting deleted"),
        (status = 401, description = "Weighting belongs to another account"),
        (status = 404, description = "Weighting not found")
    )
)]
pub async fn delete_weighting(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .weighting_service
        .delete(id, current_user.id)
        .await?;
    Ok(NoContent)
}
