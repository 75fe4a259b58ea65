use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{CapacitySettings, InventoryItem};

/// Errors raised at the persistence boundary. Store faults are wrapped
/// exactly once here; the original cause stays attached for logging.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("No database configured")]
    Unavailable,

    #[error("Row not found")]
    NotFound,

    #[error("Corrupt attribute data in column '{column}'")]
    CorruptAttributes { column: &'static str },

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// Owner-scoped rows that can be appended and listed
#[async_trait]
pub trait OwnedCollection<T>: Send + Sync {
    /// All rows for the owner, in the entity's defined order
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<T>, RepositoryError>;

    /// Insert and return the row as persisted
    async fn create(&self, item: &T) -> Result<T, RepositoryError>;
}

/// Full single-row lifecycle on top of `OwnedCollection`
#[async_trait]
pub trait ResourceRepository<T>: OwnedCollection<T> {
    async fn get_by_id(&self, id: Uuid) -> Result<T, RepositoryError>;

    /// Overwrite the mutable columns of an existing row and return it as persisted
    async fn update(&self, item: &T) -> Result<T, RepositoryError>;

    /// `NotFound` when zero rows were affected
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// One settings row per NGO user
#[async_trait]
pub trait CapacityRepository: Send + Sync {
    async fn get_by_owner(&self, owner_id: Uuid) -> Result<CapacitySettings, RepositoryError>;

    /// Insert, or overwrite the owner's existing row on conflict
    async fn upsert(&self, settings: &CapacitySettings) -> Result<CapacitySettings, RepositoryError>;
}

#[async_trait]
pub trait ExpiringInventory: Send + Sync {
    /// Owner's items expiring between now and `until`, soonest first
    async fn list_expiring(
        &self,
        owner_id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<Vec<InventoryItem>, RepositoryError>;
}

/// Map an affected-row count to `NotFound` when nothing matched
pub fn expect_affected(rows_affected: u64) -> Result<(), RepositoryError> {
    if rows_affected == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}
