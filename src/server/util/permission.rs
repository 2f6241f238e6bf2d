//! Role checks shared by services.

use entity::sea_orm_active_enums::UserRole;

use crate::server::{error::auth::AuthError, model::db::UserModel};

/// Fails with [`AuthError::Forbidden`] unless the actor is a support agent or admin.
pub fn require_staff(actor: &UserModel, action: &str) -> Result<(), AuthError> {
    if actor.role.is_staff() {
        Ok(())
    } else {
        Err(AuthError::forbidden(actor.id, action))
    }
}

/// Fails with [`AuthError::Forbidden`] unless the actor is an admin.
pub fn require_admin(actor: &UserModel, action: &str) -> Result<(), AuthError> {
    if actor.role == UserRole::Admin {
        Ok(())
    } else {
        Err(AuthError::forbidden(actor.id, action))
    }
}
