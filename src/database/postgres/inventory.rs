use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::manager::Store;
use crate::database::models::InventoryItem;
use crate::database::repository::{
    expect_affected, ExpiringInventory, OwnedCollection, RepositoryError, ResourceRepository,
};

const COLUMNS: &str = "id, user_id, name, quantity, unit, category, expiry_date, storage_type, \
    batch_code, alert_tags, status, invoice_image, created_at, updated_at";

#[derive(Clone)]
pub struct PgInventoryRepository {
    store: Store,
}

impl PgInventoryRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnedCollection<InventoryItem> for PgInventoryRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<InventoryItem>, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "SELECT {} FROM restaurant_inventory_items WHERE user_id = $1 \
             ORDER BY expiry_date ASC, created_at DESC",
            COLUMNS
        );

        Ok(sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await?)
    }

    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "INSERT INTO restaurant_inventory_items ({columns}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {columns}",
            columns = COLUMNS
        );

        Ok(sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(item.id)
            .bind(item.user_id)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(&item.unit)
            .bind(&item.category)
            .bind(item.expiry_date)
            .bind(&item.storage_type)
            .bind(&item.batch_code)
            .bind(&item.alert_tags)
            .bind(&item.status)
            .bind(&item.invoice_image)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(pool)
            .await?)
    }
}

#[async_trait]
impl ResourceRepository<InventoryItem> for PgInventoryRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<InventoryItem, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!("SELECT {} FROM restaurant_inventory_items WHERE id = $1", COLUMNS);

        sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, item: &InventoryItem) -> Result<InventoryItem, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "UPDATE restaurant_inventory_items SET name = $1, quantity = $2, unit = $3, \
             category = $4, expiry_date = $5, storage_type = $6, batch_code = $7, alert_tags = $8, \
             status = $9, invoice_image = $10, updated_at = $11 \
             WHERE id = $12 RETURNING {}",
            COLUMNS
        );

        sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(&item.unit)
            .bind(&item.category)
            .bind(item.expiry_date)
            .bind(&item.storage_type)
            .bind(&item.batch_code)
            .bind(&item.alert_tags)
            .bind(&item.status)
            .bind(&item.invoice_image)
            .bind(item.updated_at)
            .bind(item.id)
            .fetch_optional(pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let pool = self.store.pool()?;
        let result = sqlx::query("DELETE FROM restaurant_inventory_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        expect_affected(result.rows_affected())
    }
}

#[async_trait]
impl ExpiringInventory for PgInventoryRepository {
    async fn list_expiring(
        &self,
        owner_id: Uuid,
        until: DateTime<Utc>,
    ) -> Result<Vec<InventoryItem>, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!(
            "SELECT {} FROM restaurant_inventory_items \
             WHERE user_id = $1 AND expiry_date >= NOW() AND expiry_date <= $2 \
             ORDER BY expiry_date ASC",
            COLUMNS
        );

        Ok(sqlx::query_as::<_, InventoryItem>(&sql)
            .bind(owner_id)
            .bind(until)
            .fetch_all(pool)
            .await?)
    }
}
