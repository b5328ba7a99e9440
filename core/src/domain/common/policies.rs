use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, value_objects::Identity};

/// The only authorization rule in this core: a record is visible to its
/// owner and nobody else.
pub fn ensure_owner(identity: &Identity, owner_id: Uuid) -> Result<(), CoreError> {
    if identity.id() == owner_id {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied)
    }
}
