use tracing::warn;
use uuid::Uuid;

use super::error::ServiceError;

/// An entity that belongs to exactly one principal
pub trait Owned {
    fn id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Permit,
    Deny,
}

pub fn authorize(resource_owner: Uuid, principal: Uuid) -> Access {
    if resource_owner == principal {
        Access::Permit
    } else {
        Access::Deny
    }
}

/// Guard for update and delete paths. Runs after the resource has been
/// fetched, so an existing resource owned by someone else is `Forbidden`.
pub fn ensure_owner<T: Owned>(resource: &T, principal: Uuid, kind: &'static str) -> Result<(), ServiceError> {
    match authorize(resource.owner_id(), principal) {
        Access::Permit => Ok(()),
        Access::Deny => {
            warn!(
                resource = kind,
                id = %resource.id(),
                owner = %resource.owner_id(),
                principal = %principal,
                "ownership check denied"
            );
            Err(ServiceError::Forbidden)
        }
    }
}
