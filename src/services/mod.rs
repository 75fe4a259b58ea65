//! Resource lifecycle orchestration: validation, ownership, merge and persistence.

pub mod capacity;
pub mod error;
pub mod feedback;
pub mod inventory;
pub mod menu;
pub mod merge;
pub mod ownership;
pub mod resource;

pub use capacity::CapacityService;
pub use error::{ServiceError, ServiceResult};
pub use feedback::FeedbackService;
pub use inventory::InventoryService;
pub use menu::MenuService;
pub use merge::MergeInto;
pub use ownership::{authorize, ensure_owner, Access, Owned};
pub use resource::{AppendOnlyService, Entity, Mutable, ResourceService};
