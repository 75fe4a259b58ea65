use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use super::merge::MergeInto;
use super::ownership::{ensure_owner, Owned};
use crate::database::{OwnedCollection, ResourceRepository};
use crate::validation::Validate;

/// An owner-scoped entity that is built from a validated creation payload
pub trait Entity: Owned + Clone + Send + Sync + 'static {
    /// Human-readable resource name used in messages and logs
    const KIND: &'static str;

    type Draft: Validate + Send;

    /// Construct a new entity with its lifecycle defaults applied
    fn from_draft(id: Uuid, owner_id: Uuid, now: DateTime<Utc>, draft: Self::Draft) -> Self;
}

/// An entity that also supports partial update and delete
pub trait Mutable: Entity {
    type Patch: Validate + MergeInto<Self> + Send;

    fn touch(&mut self, now: DateTime<Utc>);
}

/// Run the payload through its gate. Only the first violation reaches the
/// caller; the full list goes to the debug log.
pub fn enforce<P: Validate>(payload: &P, kind: &'static str) -> ServiceResult<()> {
    let violations = payload.validate();
    match violations.first() {
        None => Ok(()),
        Some(first) => {
            debug!(resource = kind, ?violations, "payload rejected");
            Err(ServiceError::ValidationFailed(first.clone()))
        }
    }
}

/// Validate, default and persist a new entity owned by `principal`
pub async fn create_in<T, C>(repo: &C, principal: Uuid, draft: T::Draft) -> ServiceResult<T>
where
    T: Entity,
    C: OwnedCollection<T> + ?Sized,
{
    enforce(&draft, T::KIND)?;

    let entity = T::from_draft(Uuid::new_v4(), principal, Utc::now(), draft);
    let created = repo
        .create(&entity)
        .await
        .map_err(|e| ServiceError::from_repository(e, T::KIND))?;

    info!(resource = T::KIND, id = %created.id(), owner = %principal, "created");
    Ok(created)
}

/// Create and list only
pub struct AppendOnlyService<T: Entity> {
    repo: Arc<dyn OwnedCollection<T>>,
}

impl<T: Entity> AppendOnlyService<T> {
    pub fn new(repo: Arc<dyn OwnedCollection<T>>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, principal: Uuid, draft: T::Draft) -> ServiceResult<T> {
        create_in(self.repo.as_ref(), principal, draft).await
    }

    pub async fn list(&self, principal: Uuid) -> ServiceResult<Vec<T>> {
        self.repo
            .list_by_owner(principal)
            .await
            .map_err(|e| ServiceError::from_repository(e, T::KIND))
    }
}

/// Full lifecycle: create, read, list, partial update and delete
pub struct ResourceService<T: Mutable> {
    repo: Arc<dyn ResourceRepository<T>>,
}

impl<T: Mutable> ResourceService<T> {
    pub fn new(repo: Arc<dyn ResourceRepository<T>>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, principal: Uuid, draft: T::Draft) -> ServiceResult<T> {
        create_in(self.repo.as_ref(), principal, draft).await
    }

    /// Any authenticated caller may read by id
    pub async fn get(&self, id: Uuid) -> ServiceResult<T> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::from_repository(e, T::KIND))
    }

    pub async fn list(&self, principal: Uuid) -> ServiceResult<Vec<T>> {
        self.repo
            .list_by_owner(principal)
            .await
            .map_err(|e| ServiceError::from_repository(e, T::KIND))
    }

    pub async fn update(&self, principal: Uuid, id: Uuid, patch: T::Patch) -> ServiceResult<T> {
        let mut entity = self.get(id).await?;
        ensure_owner(&entity, principal, T::KIND)?;
        enforce(&patch, T::KIND)?;

        patch.merge_into(&mut entity);
        entity.touch(Utc::now());

        let updated = self
            .repo
            .update(&entity)
            .await
            .map_err(|e| ServiceError::from_repository(e, T::KIND))?;

        info!(resource = T::KIND, id = %id, "updated");
        Ok(updated)
    }

    pub async fn delete(&self, principal: Uuid, id: Uuid) -> ServiceResult<()> {
        let entity = self.get(id).await?;
        ensure_owner(&entity, principal, T::KIND)?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_repository(e, T::KIND))?;

        info!(resource = T::KIND, id = %id, "deleted");
        Ok(())
    }
}
