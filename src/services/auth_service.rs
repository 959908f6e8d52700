//! Authentication service - Registration, email activation and token issuance.
//!
//! Passwords are hashed through the domain `Password` value object and all
//! account access goes through the Unit of Work.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, ACTIVATION_EMAIL_SUBJECT};
use crate::domain::{
    validate_input, Account, AuthResponse, LoginRequest, NewAccount, Password, RegisterRequest,
    Role,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::notifications::{EmailMessage, Notifier};

/// Message returned to a freshly registered user.
pub const REGISTRATION_MESSAGE: &str =
    "Registration successful. Please check your email to activate your account.";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an inactive account and send its activation link.
    async fn register(&self, request: RegisterRequest) -> AppResult<String>;

    /// Exchange credentials of an active account for a token
    async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse>;

    /// Consume an activation token. `false` for an unknown user or a bad,
    /// already used token.
    async fn activate(&self, user_id: Uuid, token: &str) -> AppResult<bool>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Sign a token for `account`.
pub fn generate_token(account: &Account, config: &Config) -> AppResult<AuthResponse> {
    let now = Utc::now();
    let expiration = now + Duration::minutes(config.jwt_expiration_minutes);
    let roles: Vec<String> = account.roles.iter().map(Role::to_string).collect();

    let claims = Claims {
        sub: account.id,
        name: account.user_name.clone(),
        email: account.email.clone(),
        roles: roles.clone(),
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(AuthResponse {
        token,
        user_name: account.user_name.clone(),
        roles,
        expiration,
    })
}

/// Check signature, lifetime, issuer and audience.
pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.jwt_issuer.as_str()]);
    validation.set_audience(&[config.jwt_audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// 64 hex characters, safe to embed in a query string.
fn confirmation_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn Notifier>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<dyn Notifier>, config: Config) -> Self {
        Self {
            uow,
            notifier,
            config,
        }
    }

    fn activation_link(&self, user_id: Uuid, token: &str) -> String {
        format!(
            "{}?userId={}&token={}",
            self.config.activation_url, user_id, token
        )
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, request: RegisterRequest) -> AppResult<String> {
        validate_input(&request)?;
        let accounts = self.uow.accounts();

        if accounts.find_by_user_name(&request.user_name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken.",
                request.user_name
            )));
        }
        if accounts.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered.",
                request.email
            )));
        }

        let password_hash = Password::new(&request.password)?.into_string();
        let token = confirmation_token();

        let account = accounts
            .create(NewAccount {
                user_name: request.user_name,
                email: request.email,
                password_hash,
                is_active: false,
                email_confirmed: false,
                confirmation_token: Some(token.clone()),
                roles: vec![Role::User],
            })
            .await?;

        tracing::info!(user_id = %account.id, user_name = %account.user_name, "Account registered");

        let link = self.activation_link(account.id, &token);
        let message = EmailMessage::new(
            account.email.clone(),
            ACTIVATION_EMAIL_SUBJECT,
            format!(
                "Please activate your account by clicking the following link:\n{}",
                link
            ),
        );

        // The account stays registered even when delivery fails.
        if let Err(e) = self.notifier.send(message).await {
            tracing::warn!(user_id = %account.id, error = %e, "Failed to send activation email");
        }

        Ok(REGISTRATION_MESSAGE.to_string())
    }

    async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        validate_input(&request)?;

        let account = self
            .uow
            .accounts()
            .find_by_user_name(&request.user_name)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !account.is_active {
            tracing::debug!(user_id = %account.id, "Login attempt on inactive account");
            return Err(AppError::AccountNotActivated);
        }

        let stored = Password::from_hash(account.password_hash.clone());
        if !stored.verify(&request.password) {
            return Err(AppError::InvalidCredentials);
        }

        let response = generate_token(&account, &self.config)?;
        tracing::info!(user_id = %account.id, "User logged in");
        Ok(response)
    }

    async fn activate(&self, user_id: Uuid, token: &str) -> AppResult<bool> {
        let accounts = self.uow.accounts();

        if accounts.find_by_id(user_id).await?.is_none() {
            tracing::warn!(%user_id, "Activation requested for unknown user");
            return Ok(false);
        }

        if !accounts.activate_with_token(user_id, token).await? {
            tracing::warn!(%user_id, "Activation token rejected");
            return Ok(false);
        }

        tracing::info!(%user_id, "Account activated");
        Ok(true)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(roles: Vec<Role>) -> Account {
        Account {
            id: Uuid::new_v4(),
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            is_active: true,
            email_confirmed: true,
            roles,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_carries_identity_and_roles() {
        let config = Config::with_secret("an-adequately-long-secret-for-tests!!");
        let account = account(vec![Role::Admin]);

        let issued = generate_token(&account, &config).unwrap();
        let claims = verify_token(&issued.token, &config).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.iss, config.jwt_issuer);
        assert!(claims.has_role(Role::Admin));
        assert!(!claims.has_role(Role::User));
        assert_eq!(issued.roles, vec!["Admin".to_string()]);
        assert_eq!(issued.expiration.timestamp(), claims.exp);
    }

    #[test]
    fn foreign_audience_is_rejected() {
        let config = Config::with_secret("an-adequately-long-secret-for-tests!!");
        let mut other = config.clone();
        other.jwt_audience = "SomeoneElse".into();

        let issued = generate_token(&account(vec![Role::User]), &other).unwrap();

        assert!(matches!(
            verify_token(&issued.token, &config),
            Err(AppError::Jwt(_))
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = Config::with_secret("an-adequately-long-secret-for-tests!!");
        let other = Config::with_secret("a-different-but-also-long-secret-value");

        let issued = generate_token(&account(vec![Role::User]), &other).unwrap();

        assert!(verify_token(&issued.token, &config).is_err());
    }

    #[test]
    fn confirmation_tokens_are_hex_and_unique() {
        let first = confirmation_token();
        let second = confirmation_token();

        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
