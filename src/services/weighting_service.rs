//! Weighting service - measurements scoped to the account that recorded them.
//!
//! Administrators see and change every record. Everyone else only reaches
//! their own; the admin check asks the identity store on each call so a role
//! change applies without a new token.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::animal_service::animal_not_found;
use crate::config::UNKNOWN_USER_NAME;
use crate::domain::{
    validate_input, NewWeighting, Role, Weighting, WeightingInput, WeightingResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait WeightingService: Send + Sync {
    /// Every weighting for an admin, otherwise only the caller's own.
    async fn list(&self, caller: Uuid) -> AppResult<Vec<WeightingResponse>>;

    /// Records owned by `user_id`; other accounts' records need the Admin role.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        caller: Uuid,
    ) -> AppResult<Vec<WeightingResponse>>;

    async fn get(&self, id: i32, caller: Uuid) -> AppResult<Option<WeightingResponse>>;

    /// The caller becomes the owner.
    async fn create(&self, input: WeightingInput, caller: Uuid) -> AppResult<WeightingResponse>;

    async fn update(
        &self,
        id: i32,
        input: WeightingInput,
        caller: Uuid,
    ) -> AppResult<WeightingResponse>;

    async fn delete(&self, id: i32, caller: Uuid) -> AppResult<()>;
}

const VIEW_DENIED: &str = "You do not have access to this weighting record.";
const UPDATE_DENIED: &str = "You can only update your own weighting records.";
const DELETE_DENIED: &str = "You can only delete your own weighting records.";

fn weighting_not_found(id: i32) -> AppError {
    AppError::not_found(format!("Weighting with id {} not found.", id))
}

pub struct WeightingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> WeightingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn is_admin(&self, caller: Uuid) -> AppResult<bool> {
        self.uow.identities().is_in_role(caller, Role::Admin).await
    }

    async fn ensure_access(
        &self,
        weighting: &Weighting,
        caller: Uuid,
        denied: &str,
    ) -> AppResult<()> {
        if weighting.is_owned_by(caller) || self.is_admin(caller).await? {
            return Ok(());
        }

        tracing::warn!(
            weighting_id = weighting.id,
            caller = %caller,
            owner = %weighting.user_id,
            "Weighting access denied"
        );
        Err(AppError::access_denied(denied))
    }

    /// Animal must exist and have no other weighting on the same date.
    async fn check_input(&self, input: &WeightingInput, exclude_id: Option<i32>) -> AppResult<()> {
        if !self.uow.animals().exists(input.animal_id).await? {
            return Err(animal_not_found(input.animal_id));
        }

        let taken = self
            .uow
            .weightings()
            .exists_for_animal_on(input.animal_id, input.date, exclude_id)
            .await?;
        if taken {
            return Err(AppError::conflict(format!(
                "A weighting for animal {} on {} already exists.",
                input.animal_id,
                input.date.format("%Y-%m-%d")
            )));
        }

        Ok(())
    }

    async fn user_name(&self, user_id: Uuid) -> AppResult<String> {
        let name = self.uow.identities().user_name_by_id(user_id).await?;
        Ok(name.unwrap_or_else(|| UNKNOWN_USER_NAME.to_string()))
    }

    async fn to_response(&self, weighting: Weighting) -> AppResult<WeightingResponse> {
        let user_name = self.user_name(weighting.user_id).await?;
        Ok(WeightingResponse::new(weighting, user_name))
    }

    /// Resolve each distinct owner once.
    async fn to_responses(
        &self,
        weightings: Vec<Weighting>,
    ) -> AppResult<Vec<WeightingResponse>> {
        let mut owners: Vec<Uuid> = weightings.iter().map(|w| w.user_id).collect();
        owners.sort();
        owners.dedup();

        let names = try_join_all(owners.iter().map(|id| self.user_name(*id))).await?;
        let names: HashMap<Uuid, String> = owners.into_iter().zip(names).collect();

        Ok(weightings
            .into_iter()
            .map(|w| {
                let user_name = names
                    .get(&w.user_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string());
                WeightingResponse::new(w, user_name)
            })
            .collect())
    }

    async fn reload(&self, id: i32) -> AppResult<WeightingResponse> {
        let weighting = self
            .uow
            .weightings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| weighting_not_found(id))?;
        self.to_response(weighting).await
    }
}

#[async_trait]
impl<U: UnitOfWork> WeightingService for WeightingManager<U> {
    async fn list(&self, caller: Uuid) -> AppResult<Vec<WeightingResponse>> {
        let weightings = if self.is_admin(caller).await? {
            self.uow.weightings().list().await?
        } else {
            self.uow.weightings().list_by_user(caller).await?
        };
        self.to_responses(weightings).await
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        caller: Uuid,
    ) -> AppResult<Vec<WeightingResponse>> {
        if user_id != caller && !self.is_admin(caller).await? {
            tracing::warn!(caller = %caller, owner = %user_id, "Weighting listing refused");
            return Err(AppError::Forbidden);
        }

        let weightings = self.uow.weightings().list_by_user(user_id).await?;
        self.to_responses(weightings).await
    }

    async fn get(&self, id: i32, caller: Uuid) -> AppResult<Option<WeightingResponse>> {
        let Some(weighting) = self.uow.weightings().find_by_id(id).await? else {
            return Ok(None);
        };

        self.ensure_access(&weighting, caller, VIEW_DENIED).await?;
        self.to_response(weighting).await.map(Some)
    }

    async fn create(&self, input: WeightingInput, caller: Uuid) -> AppResult<WeightingResponse> {
        validate_input(&input)?;
        self.check_input(&input, None).await?;

        let created = self
            .uow
            .weightings()
            .create(NewWeighting {
                animal_id: input.animal_id,
                user_id: caller,
                date: input.date,
                weight_kg: input.normalized_weight(),
            })
            .await?;

        tracing::info!(
            weighting_id = created.id,
            animal_id = created.animal_id,
            "Weighting recorded"
        );
        self.reload(created.id).await
    }

    async fn update(
        &self,
        id: i32,
        input: WeightingInput,
        caller: Uuid,
    ) -> AppResult<WeightingResponse> {
        validate_input(&input)?;

        let mut weighting = self
            .uow
            .weightings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| weighting_not_found(id))?;

        self.ensure_access(&weighting, caller, UPDATE_DENIED).await?;
        self.check_input(&input, Some(id)).await?;

        weighting.animal_id = input.animal_id;
        weighting.date = input.date;
        weighting.weight_kg = input.normalized_weight();
        self.uow.weightings().update(weighting).await?;

        self.reload(id).await
    }

    async fn delete(&self, id: i32, caller: Uuid) -> AppResult<()> {
        let weighting = self
            .uow
            .weightings()
            .find_by_id(id)
            .await?
            .ok_or_else(|| weighting_not_found(id))?;

        self.ensure_access(&weighting, caller, DELETE_DENIED).await?;

        self.uow.weightings().delete(id).await?;
        tracing::info!(weighting_id = id, "Weighting deleted");
        Ok(())
    }
}
