use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use super::merge::{replace, replace_or_clear, MergeInto};
use super::ownership::Owned;
use super::resource::{Entity, Mutable, ResourceService};
use crate::database::models::{
    CreateInventoryItemRequest, InventoryItem, UpdateInventoryItemRequest, INVENTORY_STATUS_NORMAL,
};
use crate::database::{ExpiringInventory, ResourceRepository};

/// Upper bound on the expiring window; keeps `now + days` representable
const MAX_EXPIRING_DAYS: i64 = 3650;

impl Owned for InventoryItem {
    fn id(&self) -> Uuid {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

impl Entity for InventoryItem {
    const KIND: &'static str = "Inventory item";
    type Draft = CreateInventoryItemRequest;

    fn from_draft(id: Uuid, owner_id: Uuid, now: DateTime<Utc>, draft: CreateInventoryItemRequest) -> Self {
        Self {
            id,
            user_id: owner_id,
            name: draft.name,
            quantity: draft.quantity.unwrap_or_default(),
            unit: draft.unit,
            category: draft.category,
            expiry_date: draft.expiry_date.unwrap_or(now),
            storage_type: draft.storage_type,
            batch_code: draft.batch_code.filter(|b| !b.is_empty()),
            alert_tags: draft.alert_tags.unwrap_or_default(),
            status: INVENTORY_STATUS_NORMAL.to_string(),
            invoice_image: draft.invoice_image.filter(|i| !i.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Mutable for InventoryItem {
    type Patch = UpdateInventoryItemRequest;

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl MergeInto<InventoryItem> for UpdateInventoryItemRequest {
    fn merge_into(self, item: &mut InventoryItem) {
        replace(&mut item.name, self.name);
        replace(&mut item.quantity, self.quantity);
        replace(&mut item.unit, self.unit);
        replace(&mut item.category, self.category);
        replace(&mut item.expiry_date, self.expiry_date);
        replace(&mut item.storage_type, self.storage_type);
        replace_or_clear(&mut item.batch_code, self.batch_code);
        replace(&mut item.alert_tags, self.alert_tags);
        replace(&mut item.status, self.status);
        replace_or_clear(&mut item.invoice_image, self.invoice_image);
    }
}

/// Restaurant stock: the generic lifecycle plus the expiring-soon query
pub struct InventoryService {
    resources: ResourceService<InventoryItem>,
    expiring: Arc<dyn ExpiringInventory>,
    default_days: i64,
}

impl InventoryService {
    pub fn new<R>(repo: Arc<R>, default_days: i64) -> Self
    where
        R: ResourceRepository<InventoryItem> + ExpiringInventory + 'static,
    {
        Self {
            resources: ResourceService::new(repo.clone()),
            expiring: repo,
            default_days,
        }
    }

    pub fn resources(&self) -> &ResourceService<InventoryItem> {
        &self.resources
    }

    /// Items expiring within `days` (or the configured default when not
    /// positive), soonest first
    pub async fn expiring(&self, principal: Uuid, days: Option<i64>) -> ServiceResult<Vec<InventoryItem>> {
        let days = days
            .filter(|d| *d > 0)
            .unwrap_or(self.default_days)
            .min(MAX_EXPIRING_DAYS);
        let until = Utc::now() + Duration::days(days);

        self.expiring
            .list_expiring(principal, until)
            .await
            .map_err(|e| ServiceError::from_repository(e, InventoryItem::KIND))
    }
}
