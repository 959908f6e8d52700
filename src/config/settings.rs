//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ACTIVATION_URL, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME,
    DEFAULT_CORS_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_JWT_AUDIENCE,
    DEFAULT_JWT_EXPIRATION_MINUTES, DEFAULT_JWT_ISSUER, DEFAULT_MAIL_FROM, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};

/// Credentials of the administrator account created at startup.
#[derive(Clone)]
pub struct AdminSeed {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiration_minutes: i64,
    pub server_host: String,
    pub server_port: u16,
    pub cors_origin: String,
    /// Base URL of the frontend activation page
    pub activation_url: String,
    pub mail_from: String,
    pub admin: AdminSeed,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_origin", &self.cors_origin)
            .field("activation_url", &self.activation_url)
            .field("mail_from", &self.mail_from)
            .field("admin_user_name", &self.admin.user_name)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is missing in a release build or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            jwt_secret,
            jwt_issuer: var_or("JWT_ISSUER", DEFAULT_JWT_ISSUER),
            jwt_audience: var_or("JWT_AUDIENCE", DEFAULT_JWT_AUDIENCE),
            jwt_expiration_minutes: env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_MINUTES),
            server_host: var_or("SERVER_HOST", DEFAULT_SERVER_HOST),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            cors_origin: var_or("CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            activation_url: var_or("ACTIVATION_URL", DEFAULT_ACTIVATION_URL),
            mail_from: var_or("SMTP_FROM", DEFAULT_MAIL_FROM),
            admin: AdminSeed {
                user_name: var_or("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
                email: var_or("ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
                password: var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            },
        }
    }

    /// Build a configuration with a fixed secret and defaults for everything else.
    ///
    /// Used by tests and tooling that must not depend on the process environment.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
            jwt_audience: DEFAULT_JWT_AUDIENCE.to_string(),
            jwt_expiration_minutes: DEFAULT_JWT_EXPIRATION_MINUTES,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            activation_url: DEFAULT_ACTIVATION_URL.to_string(),
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            admin: AdminSeed {
                user_name: DEFAULT_ADMIN_USERNAME.to_string(),
                email: DEFAULT_ADMIN_EMAIL.to_string(),
                password: DEFAULT_ADMIN_PASSWORD.to_string(),
            },
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
