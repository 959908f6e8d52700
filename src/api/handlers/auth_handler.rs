//! Authentication handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AuthResponse, LoginRequest, RegisterRequest};
use crate::errors::{AppError, AppResult};
use crate::types::MessageResponse;

const INVALID_ACTIVATION: &str = "Invalid activation link or token.";

/// Query string of the emailed activation link
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ActivateQuery {
    pub user_id: Uuid,
    pub token: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/activate", get(activate))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created, activation email sent", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.auth_service.register(payload).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials or account not activated")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.auth_service.login(payload).await?;
    Ok(Json(response))
}

/// Activate an account from its emailed link
#[utoipa::path(
    get,
    path = "/api/auth/activate",
    tag = "Authentication",
    params(ActivateQuery),
    responses(
        (status = 200, description = "Account activated", body = MessageResponse),
        (status = 400, description = "Invalid activation link or token")
    )
)]
pub async fn activate(
    State(state): State<AppState>,
    query: Result<Query<ActivateQuery>, QueryRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Query(query) = query.map_err(|_| AppError::BadRequest(INVALID_ACTIVATION.into()))?;

    if !state.auth_service.activate(query.user_id, &query.token).await? {
        return Err(AppError::BadRequest(INVALID_ACTIVATION.into()));
    }

    Ok(Json(MessageResponse::new("Account activated successfully.")))
}
