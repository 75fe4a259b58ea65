//! In-memory repositories for service tests. They honour the same contracts
//! as the Postgres implementations: entity ordering, owner-unique upsert and
//! `NotFound` when nothing matched.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::database::models::{CapacitySettings, FeedbackEntry, ImpactStory, InventoryItem, MenuItem};
use crate::database::{
    CapacityRepository, ExpiringInventory, OwnedCollection, RepositoryError, ResourceRepository,
};
use crate::services::Owned;

pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

macro_rules! timestamped {
    ($($ty:ty),*) => {
        $(impl Timestamped for $ty {
            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }
        })*
    };
}

timestamped!(FeedbackEntry, ImpactStory, MenuItem, InventoryItem);

type RowOrder<T> = fn(&T, &T) -> Ordering;

pub struct MemoryRepository<T> {
    rows: Mutex<Vec<T>>,
    order: RowOrder<T>,
    fail: AtomicBool,
}

impl<T: Timestamped> MemoryRepository<T> {
    pub fn newest_first() -> Self {
        Self::with_order(|a, b| b.created_at().cmp(&a.created_at()))
    }
}

impl<T> MemoryRepository<T> {
    pub fn with_order(order: RowOrder<T>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            order,
            fail: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Make the next operation fail as a store fault
    pub fn fail_next(&self) {
        self.fail.store(true, AtomicOrdering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.swap(false, AtomicOrdering::SeqCst) {
            Err(RepositoryError::Query(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

impl<T: Owned + Clone> MemoryRepository<T> {
    /// Owner's rows in the configured order; later inserts win ties
    fn owned_sorted(&self, owner_id: Uuid, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<T> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|row| row.owner_id() == owner_id && keep(row))
            .cloned()
            .collect();
        rows.sort_by(self.order);
        rows
    }
}

#[async_trait]
impl<T> OwnedCollection<T> for MemoryRepository<T>
where
    T: Owned + Clone + Send + Sync + 'static,
{
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<T>, RepositoryError> {
        self.check()?;
        Ok(self.owned_sorted(owner_id, |_| true))
    }

    async fn create(&self, item: &T) -> Result<T, RepositoryError> {
        self.check()?;
        self.rows.lock().unwrap().push(item.clone());
        Ok(item.clone())
    }
}

#[async_trait]
impl<T> ResourceRepository<T> for MemoryRepository<T>
where
    T: Owned + Clone + Send + Sync + 'static,
{
    async fn get_by_id(&self, id: Uuid) -> Result<T, RepositoryError> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, item: &T) -> Result<T, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == item.id())
            .ok_or(RepositoryError::NotFound)?;
        *slot = item.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        crate::database::repository::expect_affected((before - rows.len()) as u64)
    }
}

/// Inventory ordering: soonest expiry, then newest created
pub type MemoryInventoryRepository = MemoryRepository<InventoryItem>;

impl Default for MemoryRepository<InventoryItem> {
    fn default() -> Self {
        Self::with_order(|a, b| {
            a.expiry_date
                .cmp(&b.expiry_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        })
    }
}

impl MemoryRepository<InventoryItem> {
    /// Seed an item that expired yesterday
    pub fn insert_expired(&self, owner_id: Uuid) -> InventoryItem {
        let now = Utc::now();
        let item = InventoryItem {
            id: Uuid::new_v4(),
            user_id: owner_id,
            name: "Expired yoghurt".into(),
            quantity: 1.0,
            unit: "pot".into(),
            category: "Dairy".into(),
            expiry_date: now - Duration::days(1),
            storage_type: "chilled".into(),
            batch_code: None,
            alert_tags: vec![],
            status: "normal".into(),
            invoice_image: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(item.clone());
        item
    }
}

#[async_trait]
impl ExpiringInventory for MemoryRepository<InventoryItem> {
    async fn list_expiring(
        &self,
        owner_id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<Vec<InventoryItem>, RepositoryError> {
        self.check()?;
        let now = Utc::now();
        Ok(self.owned_sorted(owner_id, |item| item.expiry_date >= now && item.expiry_date <= until))
    }
}

/// Owner-keyed settings; conflicts keep identity and gamification state
#[derive(Default)]
pub struct MemoryCapacityRepository {
    rows: Mutex<HashMap<Uuid, CapacitySettings>>,
    fail: AtomicBool,
}

impl MemoryCapacityRepository {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Make the next operation fail as a store fault
    pub fn fail_next(&self) {
        self.fail.store(true, AtomicOrdering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.swap(false, AtomicOrdering::SeqCst) {
            Err(RepositoryError::Query(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }

    /// Simulate gamification progress recorded elsewhere
    pub fn award(&self, owner_id: Uuid, xp_points: i32, level: i32, level_progress_pct: f64) {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&owner_id) {
            row.xp_points = xp_points;
            row.level = level;
            row.level_progress_pct = level_progress_pct;
        }
    }
}

#[async_trait]
impl CapacityRepository for MemoryCapacityRepository {
    async fn get_by_owner(&self, owner_id: Uuid) -> Result<CapacitySettings, RepositoryError> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .get(&owner_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn upsert(&self, settings: &CapacitySettings) -> Result<CapacitySettings, RepositoryError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let mut saved = settings.clone();
        if let Some(existing) = rows.get(&settings.user_id) {
            saved.id = existing.id;
            saved.current_utilization_kg = existing.current_utilization_kg;
            saved.xp_points = existing.xp_points;
            saved.level = existing.level;
            saved.level_progress_pct = existing.level_progress_pct;
        }
        rows.insert(settings.user_id, saved.clone());
        Ok(saved)
    }
}
