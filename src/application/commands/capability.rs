// src/application/commands/capability.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::UserId;

/// Single authorization gate, called once at the top of every operation.
pub(crate) fn ensure_capability(
    actor: &AuthenticatedUser,
    resource: &str,
    action: &str,
) -> ApplicationResult<()> {
    if actor.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}

/// Row scope for listings split into `read:any` and `read:own`. `None` means
/// every row is visible; otherwise only rows owned by the returned user.
pub(crate) fn visibility_scope(
    actor: &AuthenticatedUser,
    resource: &str,
) -> ApplicationResult<Option<UserId>> {
    if actor.has_capability(resource, "read:any") {
        Ok(None)
    } else {
        ensure_capability(actor, resource, "read:own")?;
        Ok(Some(actor.id))
    }
}
