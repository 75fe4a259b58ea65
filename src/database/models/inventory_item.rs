use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Validate, ValidationGate};

pub const STORAGE_TYPES: &[&str] = &["fresh", "chilled", "frozen", "dry"];
pub const INVENTORY_STATUS_NORMAL: &str = "normal";

/// Stock on hand for a restaurant, tracked against its expiry date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InventoryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub expiry_date: DateTime<Utc>,
    pub storage_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_code: Option<String>,
    pub alert_tags: Vec<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInventoryItemRequest {
    #[serde(default)]
    pub name: String,
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub storage_type: String,
    pub batch_code: Option<String>,
    pub alert_tags: Option<Vec<String>>,
    pub invoice_image: Option<String>,
}

impl Validate for CreateInventoryItemRequest {
    fn validate(&self) -> Vec<String> {
        let mut gate = ValidationGate::new();
        gate.text("name", Some(self.name.as_str())).required().max_len(255);
        gate.number("quantity", self.quantity).required().greater_than(0.0);
        gate.text("unit", Some(self.unit.as_str())).required().max_len(50);
        gate.text("category", Some(self.category.as_str())).required().max_len(100);
        gate.require("expiry_date", self.expiry_date.is_some());
        gate.text("storage_type", Some(self.storage_type.as_str()))
            .required()
            .one_of(STORAGE_TYPES);
        gate.text("batch_code", self.batch_code.as_deref()).max_len(100);
        gate.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInventoryItemRequest {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub storage_type: Option<String>,
    pub batch_code: Option<String>,
    pub alert_tags: Option<Vec<String>>,
    pub status: Option<String>,
    pub invoice_image: Option<String>,
}

impl Validate for UpdateInventoryItemRequest {
    fn validate(&self) -> Vec<String> {
        let mut gate = ValidationGate::new();
        gate.text("name", self.name.as_deref()).min_len(1).max_len(255);
        gate.number("quantity", self.quantity).greater_than(0.0);
        gate.text("unit", self.unit.as_deref()).min_len(1).max_len(50);
        gate.text("category", self.category.as_deref()).min_len(1).max_len(100);
        gate.text("storage_type", self.storage_type.as_deref()).one_of(STORAGE_TYPES);
        gate.text("batch_code", self.batch_code.as_deref()).max_len(100);
        gate.text("status", self.status.as_deref()).min_len(1).max_len(50);
        gate.finish()
    }
}

/// Query string for `GET /inventory/expiring`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<i64>,
}
