use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::attributes::{AttributeCodec, Attributes};
use crate::database::repository::RepositoryError;
use crate::validation::{Validate, ValidationGate};

pub const DEFAULT_PICKUP_RADIUS_KM: f64 = 5.0;

/// NGO donation capacity and preferences; exactly one row per NGO user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySettings {
    pub id: Uuid,
    pub user_id: Uuid,
    pub org_name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub geo_point: Attributes,
    pub manager_name: String,
    pub contact_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub preferred_food_types: Vec<String>,
    pub restricted_items: Vec<String>,
    pub storage_types: Vec<String>,
    pub safety_rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_notes: Option<String>,
    pub pickup_window: Attributes,
    pub daily_capacity_kg: f64,
    pub refrigerated_capacity_kg: f64,
    pub dry_capacity_kg: f64,
    pub current_utilization_kg: f64,
    pub xp_points: i32,
    pub level: i32,
    pub level_progress_pct: f64,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub auto_acceptance: Attributes,
    pub preferred_pickup_radius_km: f64,
    pub updated_at: DateTime<Utc>,
}

/// Raw `ngo_capacity_settings` row; attribute columns are still encoded
#[derive(Debug, FromRow)]
pub struct CapacitySettingsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub org_name: String,
    pub location: String,
    pub geo_point: Option<Vec<u8>>,
    pub manager_name: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub preferred_food_types: Option<Vec<String>>,
    pub restricted_items: Option<Vec<String>>,
    pub storage_types: Option<Vec<String>>,
    pub safety_rules: Option<Vec<String>>,
    pub policy_notes: Option<String>,
    pub pickup_window: Option<Vec<u8>>,
    pub daily_capacity_kg: f64,
    pub refrigerated_capacity_kg: f64,
    pub dry_capacity_kg: f64,
    pub current_utilization_kg: f64,
    pub xp_points: i32,
    pub level: i32,
    pub level_progress_pct: f64,
    pub auto_acceptance: Option<Vec<u8>>,
    pub preferred_pickup_radius_km: f64,
    pub updated_at: DateTime<Utc>,
}

impl CapacitySettingsRow {
    pub fn into_entity(self, codec: &AttributeCodec) -> Result<CapacitySettings, RepositoryError> {
        Ok(CapacitySettings {
            id: self.id,
            user_id: self.user_id,
            org_name: self.org_name,
            location: self.location,
            geo_point: codec.decode("geo_point", self.geo_point.as_deref())?,
            manager_name: self.manager_name,
            contact_phone: self.contact_phone,
            contact_email: self.contact_email,
            preferred_food_types: self.preferred_food_types.unwrap_or_default(),
            restricted_items: self.restricted_items.unwrap_or_default(),
            storage_types: self.storage_types.unwrap_or_default(),
            safety_rules: self.safety_rules.unwrap_or_default(),
            policy_notes: self.policy_notes,
            pickup_window: codec.decode("pickup_window", self.pickup_window.as_deref())?,
            daily_capacity_kg: self.daily_capacity_kg,
            refrigerated_capacity_kg: self.refrigerated_capacity_kg,
            dry_capacity_kg: self.dry_capacity_kg,
            current_utilization_kg: self.current_utilization_kg,
            xp_points: self.xp_points,
            level: self.level,
            level_progress_pct: self.level_progress_pct,
            auto_acceptance: codec.decode("auto_acceptance", self.auto_acceptance.as_deref())?,
            preferred_pickup_radius_km: self.preferred_pickup_radius_km,
            updated_at: self.updated_at,
        })
    }
}

/// Full replacement payload for the owner's capacity settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapacitySettingsRequest {
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub location: String,
    pub geo_point: Option<Attributes>,
    pub manager_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub preferred_food_types: Option<Vec<String>>,
    pub restricted_items: Option<Vec<String>>,
    pub storage_types: Option<Vec<String>>,
    pub safety_rules: Option<Vec<String>>,
    pub policy_notes: Option<String>,
    pub pickup_window: Option<Attributes>,
    pub daily_capacity_kg: Option<f64>,
    pub refrigerated_capacity_kg: Option<f64>,
    pub dry_capacity_kg: Option<f64>,
    pub auto_acceptance: Option<Attributes>,
    pub preferred_pickup_radius_km: Option<f64>,
}

impl Validate for CapacitySettingsRequest {
    fn validate(&self) -> Vec<String> {
        let mut gate = ValidationGate::new();
        gate.text("org_name", Some(self.org_name.as_str())).required().max_len(255);
        gate.text("location", Some(self.location.as_str())).required();
        gate.text("manager_name", self.manager_name.as_deref()).max_len(255);
        gate.text("contact_phone", self.contact_phone.as_deref()).max_len(50);
        gate.text("contact_email", self.contact_email.as_deref()).optional().max_len(255).email();
        gate.require("pickup_window", self.pickup_window.is_some());
        gate.number("daily_capacity_kg", self.daily_capacity_kg)
            .required()
            .greater_than(0.0);
        gate.number("refrigerated_capacity_kg", self.refrigerated_capacity_kg).at_least(0.0);
        gate.number("dry_capacity_kg", self.dry_capacity_kg).at_least(0.0);
        gate.number("preferred_pickup_radius_km", self.preferred_pickup_radius_km).at_least(0.0);
        gate.finish()
    }
}
