//! Postgres implementations of the repository traits.
//!
//! Every repository holds a `Store` clone and resolves the pool per call, so a
//! process started without `DATABASE_URL` still serves routes and reports the
//! store as unavailable on each data operation.

mod capacity;
mod feedback;
mod inventory;
mod menu;

pub use capacity::PgCapacityRepository;
pub use feedback::{PgFeedbackRepository, PgStoryRepository};
pub use inventory::PgInventoryRepository;
pub use menu::PgMenuRepository;
