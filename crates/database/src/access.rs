use crate::{entities::users, error::ServiceError};
use models::role::Role;

/// Fails with `Forbidden` unless the caller's role is in `allowed`
pub fn require_roles(caller: &users::Model, allowed: &[Role]) -> Result<(), ServiceError> {
    if allowed.contains(&caller.role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(
            "You are not allowed to perform this action".to_string(),
        ))
    }
}
