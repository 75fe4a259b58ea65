use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use super::resource::enforce;
use crate::database::models::{CapacitySettings, CapacitySettingsRequest, DEFAULT_PICKUP_RADIUS_KM};
use crate::database::CapacityRepository;

const KIND: &str = "Capacity settings";

pub struct CapacityService {
    repo: Arc<dyn CapacityRepository>,
}

impl CapacityService {
    pub fn new(repo: Arc<dyn CapacityRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, principal: Uuid) -> ServiceResult<CapacitySettings> {
        self.repo
            .get_by_owner(principal)
            .await
            .map_err(|e| ServiceError::from_repository(e, KIND))
    }

    /// Insert or fully replace the principal's single settings row
    pub async fn upsert(&self, principal: Uuid, request: CapacitySettingsRequest) -> ServiceResult<CapacitySettings> {
        enforce(&request, KIND)?;

        let settings = build_settings(principal, request);
        let saved = self
            .repo
            .upsert(&settings)
            .await
            .map_err(|e| ServiceError::from_repository(e, KIND))?;

        info!(resource = KIND, id = %saved.id, owner = %principal, "upserted");
        Ok(saved)
    }
}

/// Full replacement entity with fresh gamification state; the store keeps an
/// existing row's counters on conflict
fn build_settings(principal: Uuid, request: CapacitySettingsRequest) -> CapacitySettings {
    let radius = match request.preferred_pickup_radius_km {
        Some(radius) if radius > 0.0 => radius,
        _ => DEFAULT_PICKUP_RADIUS_KM,
    };

    CapacitySettings {
        id: Uuid::new_v4(),
        user_id: principal,
        org_name: request.org_name,
        location: request.location,
        geo_point: request.geo_point.unwrap_or_default(),
        manager_name: request.manager_name.unwrap_or_default(),
        contact_phone: request.contact_phone.unwrap_or_default(),
        contact_email: request.contact_email.filter(|email| !email.is_empty()),
        preferred_food_types: request.preferred_food_types.unwrap_or_default(),
        restricted_items: request.restricted_items.unwrap_or_default(),
        storage_types: request.storage_types.unwrap_or_default(),
        safety_rules: request.safety_rules.unwrap_or_default(),
        policy_notes: request.policy_notes.filter(|notes| !notes.is_empty()),
        pickup_window: request.pickup_window.unwrap_or_default(),
        daily_capacity_kg: request.daily_capacity_kg.unwrap_or_default(),
        refrigerated_capacity_kg: request.refrigerated_capacity_kg.unwrap_or_default(),
        dry_capacity_kg: request.dry_capacity_kg.unwrap_or_default(),
        current_utilization_kg: 0.0,
        xp_points: 0,
        level: 1,
        level_progress_pct: 0.0,
        auto_acceptance: request.auto_acceptance.unwrap_or_default(),
        preferred_pickup_radius_km: radius,
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Attributes;
    use crate::testing::MemoryCapacityRepository;
    use serde_json::json;

    fn scenario() -> CapacitySettingsRequest {
        serde_json::from_value(json!({
            "org_name": "Helping Hands",
            "location": "Downtown",
            "daily_capacity_kg": 50,
            "pickup_window": { "start": "09:00", "end": "17:00" }
        }))
        .unwrap()
    }

    fn service() -> (CapacityService, Arc<MemoryCapacityRepository>) {
        let repo = Arc::new(MemoryCapacityRepository::default());
        (CapacityService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn scenario_upsert_applies_defaults() {
        let (service, _) = service();
        let owner = Uuid::new_v4();

        let saved = service.upsert(owner, scenario()).await.unwrap();
        assert_eq!(saved.user_id, owner);
        assert_eq!(saved.preferred_pickup_radius_km, 5.0);
        assert_eq!(saved.level, 1);
        assert_eq!(saved.xp_points, 0);
        assert_eq!(saved.current_utilization_kg, 0.0);
        assert_eq!(saved.pickup_window.get("start"), Some(&json!("09:00")));
    }

    #[tokio::test]
    async fn zero_radius_falls_back_to_default() {
        let (service, _) = service();
        let request = CapacitySettingsRequest {
            preferred_pickup_radius_km: Some(0.0),
            ..scenario()
        };
        let saved = service.upsert(Uuid::new_v4(), request).await.unwrap();
        assert_eq!(saved.preferred_pickup_radius_km, DEFAULT_PICKUP_RADIUS_KM);
    }

    #[tokio::test]
    async fn second_upsert_overwrites_single_row() {
        let (service, repo) = service();
        let owner = Uuid::new_v4();

        let first = service.upsert(owner, scenario()).await.unwrap();
        let second = service
            .upsert(
                owner,
                CapacitySettingsRequest {
                    org_name: "Helping Hands North".into(),
                    preferred_pickup_radius_km: Some(12.5),
                    ..scenario()
                },
            )
            .await
            .unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.org_name, "Helping Hands North");
        assert_eq!(second.preferred_pickup_radius_km, 12.5);
        assert_eq!(service.get(owner).await.unwrap(), second);
    }

    #[tokio::test]
    async fn upsert_keeps_gamification_state() {
        let (service, repo) = service();
        let owner = Uuid::new_v4();
        service.upsert(owner, scenario()).await.unwrap();
        repo.award(owner, 120, 3, 40.0);

        let saved = service.upsert(owner, scenario()).await.unwrap();
        assert_eq!((saved.xp_points, saved.level, saved.level_progress_pct), (120, 3, 40.0));
    }

    #[tokio::test]
    async fn invalid_payload_persists_nothing() {
        let (service, repo) = service();
        let request = CapacitySettingsRequest {
            pickup_window: None,
            ..scenario()
        };

        let err = service.upsert(Uuid::new_v4(), request).await.unwrap_err();
        assert!(matches!(err, ServiceError::ValidationFailed(ref m) if m == "pickup_window is required"));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn missing_settings_is_not_found() {
        let (service, _) = service();
        let err = service.get(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.safe_message(), "Capacity settings not found");
    }

    #[tokio::test]
    async fn store_fault_surfaces_as_database_error() {
        let (service, repo) = service();
        let owner = Uuid::new_v4();

        repo.fail_next();
        let err = service.upsert(owner, scenario()).await.unwrap_err();
        assert_eq!(err.kind(), "DATABASE_ERROR");
        assert_eq!(repo.len(), 0);

        service.upsert(owner, scenario()).await.unwrap();
        repo.fail_next();
        let err = service.get(owner).await.unwrap_err();
        assert!(matches!(err, ServiceError::Database(_)));
    }

    #[test]
    fn empty_optional_text_is_stored_as_absent() {
        let request = CapacitySettingsRequest {
            contact_email: Some(String::new()),
            geo_point: Some(Attributes::new()),
            ..scenario()
        };
        let settings = build_settings(Uuid::new_v4(), request);
        assert!(settings.contact_email.is_none());
        assert!(settings.geo_point.is_empty());
    }
}
