pub mod attributes;
pub mod manager;
pub mod models;
pub mod postgres;
pub mod repository;

pub use attributes::{AttributeCodec, Attributes, DecodePolicy};
pub use manager::Store;
pub use repository::{
    CapacityRepository, ExpiringInventory, OwnedCollection, RepositoryError, ResourceRepository,
};
