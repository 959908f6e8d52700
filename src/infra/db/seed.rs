//! Startup seeding of the administrator account.

use crate::config::AdminSeed;
use crate::domain::{NewAccount, Password, Role};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Ensure the configured administrator exists.
///
/// Returns true when the account was created. An existing account with the
/// same username is left untouched.
pub async fn ensure_admin<U: UnitOfWork + ?Sized>(
    uow: &U,
    admin: &AdminSeed,
) -> AppResult<bool> {
    let accounts = uow.accounts();

    if accounts.find_by_user_name(&admin.user_name).await?.is_some() {
        tracing::debug!(user_name = %admin.user_name, "Admin account already present");
        return Ok(false);
    }

    let password_hash = Password::new(&admin.password)?.into_string();
    let account = accounts
        .create(NewAccount {
            user_name: admin.user_name.clone(),
            email: admin.email.clone(),
            password_hash,
            is_active: true,
            email_confirmed: true,
            confirmation_token: None,
            roles: vec![Role::Admin],
        })
        .await?;

    tracing::info!(account_id = %account.id, user_name = %account.user_name, "Admin account seeded");
    Ok(true)
}
