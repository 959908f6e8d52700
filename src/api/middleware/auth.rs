//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::Role;
use crate::errors::AppError;
use crate::services::Claims;

/// Authenticated caller extracted from the JWT
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl CurrentUser {
    /// Role claim carried by the token; only used at the HTTP boundary.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == Role::Admin.as_str())
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            user_name: claims.name,
            email: claims.email,
            roles: claims.roles,
        }
    }
}

/// Validates the bearer token and injects [`CurrentUser`] into the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(bearer.token())?;
    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, "Admin route refused");
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn admin_role_passes() {
        assert!(require_admin(&user(&["User", "Admin"])).is_ok());
    }

    #[test]
    fn plain_user_is_forbidden() {
        assert!(matches!(
            require_admin(&user(&["User"])),
            Err(AppError::Forbidden)
        ));
    }
}
