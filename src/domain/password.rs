//! Password value object.
//!
//! Owns the registration password policy and Argon2 hashing so the rest of
//! the crate only ever handles opaque hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid regex"));

/// Hashed password.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Check the policy and hash the plain text.
    ///
    /// # Errors
    /// Returns a validation error listing every rule the password breaks.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let violations = Self::policy_violations(plain_text);
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    /// Rules broken by `plain_text`, in a stable order.
    pub fn policy_violations(plain_text: &str) -> Vec<String> {
        let mut violations = Vec::new();

        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            violations.push(format!(
                "Passwords must be at least {} characters.",
                MIN_PASSWORD_LENGTH
            ));
        }
        if !DIGIT.is_match(plain_text) {
            violations.push("Passwords must have at least one digit ('0'-'9').".to_string());
        }
        if !LOWERCASE.is_match(plain_text) {
            violations.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
        }
        if !UPPERCASE.is_match(plain_text) {
            violations.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
        }
        if !NON_ALPHANUMERIC.is_match(plain_text) {
            violations
                .push("Passwords must have at least one non alphanumeric character.".to_string());
        }

        violations
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("Secret1!").unwrap();

        assert!(password.verify("Secret1!"));
        assert!(!password.verify("Secret2!"));
    }

    #[test]
    fn test_password_from_hash() {
        let hash = Password::new("Admin123!").unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify("Admin123!"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = Password::new("Secret1!").unwrap();
        let second = Password::new("Secret1!").unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify("Secret1!"));
        assert!(second.verify("Secret1!"));
    }

    #[test]
    fn test_policy_reports_every_broken_rule() {
        let violations = Password::policy_violations("abc");

        assert_eq!(violations.len(), 4);
        assert!(violations[0].contains("at least 6 characters"));
    }

    #[test]
    fn test_weak_password_is_rejected() {
        match Password::new("password") {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!Password::from_hash("not-a-hash".to_string()).verify("anything"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("Secret1!").unwrap();
        assert!(format!("{:?}", password).contains("REDACTED"));
    }
}
