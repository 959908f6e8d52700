//! Credential store: accounts, their roles and activation tokens.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::account::{self, ActiveModel, Entity as AccountEntity};
use super::entities::account_role::{self, Entity as AccountRoleEntity};
use crate::domain::{Account, NewAccount, Role};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account persistence.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All accounts with their roles resolved
    async fn list(&self) -> AppResult<Vec<Account>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert the account and its role rows atomically
    async fn create(&self, account: NewAccount) -> AppResult<Account>;

    /// Set the active flag; returns false when the account does not exist
    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<bool>;

    /// Activate the account and confirm its email if `token` matches the
    /// pending one, clearing it in the same write.
    ///
    /// Returns false for unknown accounts and stale or wrong tokens.
    async fn activate_with_token(&self, id: Uuid, token: &str) -> AppResult<bool>;
}

/// Identity queries used for display names and per-call role checks.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn user_name_by_id(&self, id: Uuid) -> AppResult<Option<String>>;

    async fn is_in_role(&self, id: Uuid, role: Role) -> AppResult<bool>;
}

pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn roles_of(&self, id: Uuid) -> AppResult<Vec<Role>> {
        let rows = AccountRoleEntity::find()
            .filter(account_role::Column::AccountId.eq(id))
            .order_by_asc(account_role::Column::Role)
            .all(&self.db)
            .await?;

        Ok(rows.iter().filter_map(|r| Role::parse(&r.role)).collect())
    }

    async fn with_roles(&self, model: Option<account::Model>) -> AppResult<Option<Account>> {
        match model {
            Some(model) => {
                let roles = self.roles_of(model.id).await?;
                Ok(Some(to_domain(model, roles)))
            }
            None => Ok(None),
        }
    }
}

fn to_domain(model: account::Model, roles: Vec<Role>) -> Account {
    Account {
        id: model.id,
        user_name: model.user_name,
        email: model.email,
        password_hash: model.password_hash,
        is_active: model.is_active,
        email_confirmed: model.email_confirmed,
        roles,
        created_at: model.created_at,
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn list(&self) -> AppResult<Vec<Account>> {
        let accounts = AccountEntity::find()
            .order_by_asc(account::Column::UserName)
            .all(&self.db)
            .await?;

        let mut roles: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for row in AccountRoleEntity::find()
            .order_by_asc(account_role::Column::Role)
            .all(&self.db)
            .await?
        {
            if let Some(role) = Role::parse(&row.role) {
                roles.entry(row.account_id).or_default().push(role);
            }
        }

        Ok(accounts
            .into_iter()
            .map(|model| {
                let account_roles = roles.remove(&model.id).unwrap_or_default();
                to_domain(model, account_roles)
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let model = AccountEntity::find_by_id(id).one(&self.db).await?;
        self.with_roles(model).await
    }

    async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<Account>> {
        let model = AccountEntity::find()
            .filter(account::Column::UserName.eq(user_name))
            .one(&self.db)
            .await?;
        self.with_roles(model).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let model = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        self.with_roles(model).await
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_name: Set(account.user_name),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            is_active: Set(account.is_active),
            email_confirmed: Set(account.email_confirmed),
            confirmation_token: Set(account.confirmation_token),
            created_at: Set(chrono::Utc::now()),
        };
        let model = active_model.insert(&txn).await.map_err(AppError::from)?;

        if !account.roles.is_empty() {
            let rows = account.roles.iter().map(|role| account_role::ActiveModel {
                account_id: Set(model.id),
                role: Set(role.to_string()),
            });
            AccountRoleEntity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(AppError::from)?;
        }

        txn.commit().await.map_err(AppError::from)?;

        Ok(to_domain(model, account.roles))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<bool> {
        let result = AccountEntity::update_many()
            .col_expr(account::Column::IsActive, Expr::value(is_active))
            .filter(account::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn activate_with_token(&self, id: Uuid, token: &str) -> AppResult<bool> {
        // One conditional update: the token is redeemed at most once and never
        // without the account becoming active
        let result = AccountEntity::update_many()
            .col_expr(account::Column::IsActive, Expr::value(true))
            .col_expr(account::Column::EmailConfirmed, Expr::value(true))
            .col_expr(
                account::Column::ConfirmationToken,
                Expr::value(Option::<String>::None),
            )
            .filter(account::Column::Id.eq(id))
            .filter(account::Column::ConfirmationToken.eq(token))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[async_trait]
impl IdentityLookup for AccountStore {
    async fn user_name_by_id(&self, id: Uuid) -> AppResult<Option<String>> {
        let model = AccountEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.user_name))
    }

    async fn is_in_role(&self, id: Uuid, role: Role) -> AppResult<bool> {
        let row = AccountRoleEntity::find_by_id((id, role.to_string()))
            .one(&self.db)
            .await?;
        Ok(row.is_some())
    }
}
