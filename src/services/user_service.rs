//! Account administration.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::AccountResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> AppResult<Vec<AccountResponse>>;

    async fn activate_user(&self, id: Uuid) -> AppResult<()>;

    async fn deactivate_user(&self, id: Uuid) -> AppResult<()>;
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<()> {
        if !self.uow.accounts().set_active(id, is_active).await? {
            return Err(AppError::not_found(format!(
                "User with id '{}' not found.",
                id
            )));
        }
        tracing::info!(user_id = %id, is_active, "User activation changed");
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<AccountResponse>> {
        let accounts = self.uow.accounts().list().await?;
        Ok(accounts.into_iter().map(AccountResponse::from).collect())
    }

    async fn activate_user(&self, id: Uuid) -> AppResult<()> {
        self.set_active(id, true).await
    }

    async fn deactivate_user(&self, id: Uuid) -> AppResult<()> {
        self.set_active(id, false).await
    }
}
