use async_trait::async_trait;
use uuid::Uuid;

use crate::database::attributes::AttributeCodec;
use crate::database::manager::Store;
use crate::database::models::{CapacitySettings, CapacitySettingsRow};
use crate::database::repository::{CapacityRepository, RepositoryError};

const COLUMNS: &str = "id, user_id, org_name, location, geo_point, manager_name, contact_phone, \
    contact_email, preferred_food_types, restricted_items, storage_types, safety_rules, \
    policy_notes, pickup_window, daily_capacity_kg, refrigerated_capacity_kg, dry_capacity_kg, \
    current_utilization_kg, xp_points, level, level_progress_pct, auto_acceptance, \
    preferred_pickup_radius_km, updated_at";

#[derive(Clone)]
pub struct PgCapacityRepository {
    store: Store,
    codec: AttributeCodec,
}

impl PgCapacityRepository {
    pub fn new(store: Store, codec: AttributeCodec) -> Self {
        Self { store, codec }
    }
}

#[async_trait]
impl CapacityRepository for PgCapacityRepository {
    async fn get_by_owner(&self, owner_id: Uuid) -> Result<CapacitySettings, RepositoryError> {
        let pool = self.store.pool()?;
        let sql = format!("SELECT {} FROM ngo_capacity_settings WHERE user_id = $1", COLUMNS);

        let row = sqlx::query_as::<_, CapacitySettingsRow>(&sql)
            .bind(owner_id)
            .fetch_optional(pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        row.into_entity(&self.codec)
    }

    async fn upsert(&self, settings: &CapacitySettings) -> Result<CapacitySettings, RepositoryError> {
        let pool = self.store.pool()?;

        // Identity and gamification state of an existing row survive the overwrite
        let sql = format!(
            "INSERT INTO ngo_capacity_settings ({columns}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24) \
             ON CONFLICT (user_id) DO UPDATE SET \
                org_name = EXCLUDED.org_name, \
                location = EXCLUDED.location, \
                geo_point = EXCLUDED.geo_point, \
                manager_name = EXCLUDED.manager_name, \
                contact_phone = EXCLUDED.contact_phone, \
                contact_email = EXCLUDED.contact_email, \
                preferred_food_types = EXCLUDED.preferred_food_types, \
                restricted_items = EXCLUDED.restricted_items, \
                storage_types = EXCLUDED.storage_types, \
                safety_rules = EXCLUDED.safety_rules, \
                policy_notes = EXCLUDED.policy_notes, \
                pickup_window = EXCLUDED.pickup_window, \
                daily_capacity_kg = EXCLUDED.daily_capacity_kg, \
                refrigerated_capacity_kg = EXCLUDED.refrigerated_capacity_kg, \
                dry_capacity_kg = EXCLUDED.dry_capacity_kg, \
                auto_acceptance = EXCLUDED.auto_acceptance, \
                preferred_pickup_radius_km = EXCLUDED.preferred_pickup_radius_km, \
                updated_at = EXCLUDED.updated_at \
             RETURNING {columns}",
            columns = COLUMNS
        );

        let row = sqlx::query_as::<_, CapacitySettingsRow>(&sql)
            .bind(settings.id)
            .bind(settings.user_id)
            .bind(&settings.org_name)
            .bind(&settings.location)
            .bind(self.codec.encode(Some(&settings.geo_point)))
            .bind(&settings.manager_name)
            .bind(&settings.contact_phone)
            .bind(&settings.contact_email)
            .bind(&settings.preferred_food_types)
            .bind(&settings.restricted_items)
            .bind(&settings.storage_types)
            .bind(&settings.safety_rules)
            .bind(&settings.policy_notes)
            .bind(self.codec.encode(Some(&settings.pickup_window)))
            .bind(settings.daily_capacity_kg)
            .bind(settings.refrigerated_capacity_kg)
            .bind(settings.dry_capacity_kg)
            .bind(settings.current_utilization_kg)
            .bind(settings.xp_points)
            .bind(settings.level)
            .bind(settings.level_progress_pct)
            .bind(self.codec.encode(Some(&settings.auto_acceptance)))
            .bind(settings.preferred_pickup_radius_km)
            .bind(settings.updated_at)
            .fetch_one(pool)
            .await?;

        row.into_entity(&self.codec)
    }
}
