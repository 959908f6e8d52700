//! Account administration handlers (admin only).

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::AccountResponse;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create user administration routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/activate", put(activate_user))
        .route("/:id/deactivate", put(deactivate_user))
}

/// List all accounts with their roles
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = Vec<AccountResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    require_admin(&current_user)?;

    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Activate an account
#[utoipa::path(
    put,
    path = "/api/users/{id}/activate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account activated", body = MessageResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn activate_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    state.user_service.activate_user(id).await?;
    Ok(Json(MessageResponse::new("User activated successfully.")))
}

/// Deactivate an account
#[utoipa::path(
    put,
    path = "/api/users/{id}/deactivate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deactivated", body = MessageResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn deactivate_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    state.user_service.deactivate_user(id).await?;
    Ok(Json(MessageResponse::new("User deactivated successfully.")))
}
