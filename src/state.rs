//! Shared application state handed to every handler through axum's `State`.
//!
//! Built once at startup from `AppConfig` and a `Store`; cloning is cheap
//! since services sit behind `Arc`.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::postgres::{
    PgCapacityRepository, PgFeedbackRepository, PgInventoryRepository, PgMenuRepository, PgStoryRepository,
};
use crate::database::{AttributeCodec, DecodePolicy, Store};
use crate::services::{CapacityService, FeedbackService, InventoryService, MenuService};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub jwt_secret: Arc<str>,
    pub capacity: Arc<CapacityService>,
    pub feedback: Arc<FeedbackService>,
    pub menu: Arc<MenuService>,
    pub inventory: Arc<InventoryService>,
}

impl AppState {
    /// Wire the Postgres repositories onto the given store
    pub fn new(config: &AppConfig, store: Store) -> Self {
        let policy = if config.database.strict_attribute_decoding {
            DecodePolicy::Strict
        } else {
            DecodePolicy::Tolerant
        };
        let codec = AttributeCodec::new(policy);

        let capacity = CapacityService::new(Arc::new(PgCapacityRepository::new(store.clone(), codec)));
        let feedback = FeedbackService::new(
            Arc::new(PgFeedbackRepository::new(store.clone())),
            Arc::new(PgStoryRepository::new(store.clone())),
        );
        let menu = MenuService::new(Arc::new(PgMenuRepository::new(store.clone(), codec)));
        let inventory = InventoryService::new(
            Arc::new(PgInventoryRepository::new(store.clone())),
            config.inventory.default_expiring_days,
        );

        Self {
            store,
            jwt_secret: Arc::from(config.security.jwt_secret.as_str()),
            capacity: Arc::new(capacity),
            feedback: Arc::new(feedback),
            menu: Arc::new(menu),
            inventory: Arc::new(inventory),
        }
    }
}
