pub mod capacity;
pub mod feedback;
pub mod inventory_item;
pub mod menu_item;
pub mod story;

pub use capacity::{CapacitySettings, CapacitySettingsRequest, CapacitySettingsRow, DEFAULT_PICKUP_RADIUS_KM};
pub use feedback::{CreateFeedbackRequest, FeedbackEntry, FEEDBACK_STATUS_PENDING};
pub use inventory_item::{
    CreateInventoryItemRequest, ExpiringQuery, InventoryItem, UpdateInventoryItemRequest,
    INVENTORY_STATUS_NORMAL, STORAGE_TYPES,
};
pub use menu_item::{CreateMenuItemRequest, MenuItem, MenuItemRow, UpdateMenuItemRequest, WASTE_SCORES};
pub use story::{CreateStoryRequest, ImpactStory};
