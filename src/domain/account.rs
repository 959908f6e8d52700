//! Account (credential store) entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_USER};
use crate::domain::validation::{email_address, not_blank};

/// Roles an account can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::User => ROLE_USER,
        }
    }

    /// Parse a stored role name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_USER => Some(Role::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub email_confirmed: bool,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Data needed to create an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub email_confirmed: bool,
    pub confirmation_token: Option<String>,
    pub roles: Vec<Role>,
}

/// Account as listed to administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    #[schema(example = "alice")]
    pub user_name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub is_active: bool,
    #[schema(example = json!(["User"]))]
    pub roles: Vec<String>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            user_name: account.user_name,
            email: account.email,
            is_active: account.is_active,
            roles: account.roles.iter().map(Role::to_string).collect(),
        }
    }
}

/// Issued access token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed JWT to send as `Authorization: Bearer <token>`
    pub token: String,
    pub user_name: String,
    pub roles: Vec<String>,
    /// Instant after which the token is rejected
    pub expiration: DateTime<Utc>,
}

/// Self-service registration payload.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "alice")]
    pub user_name: String,
    #[validate(custom(function = "email_address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Secret1!")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "alice")]
    pub user_name: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Secret1!")]
    pub password: String,
}
