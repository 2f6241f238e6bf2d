//! Factory functions for generating mock user database models.
//!
//! These are in-memory model instances that don't require database interaction.

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;

use crate::{constant::TEST_EMAIL_DOMAIN, model::UserModel};

/// Create a mock user model with the given ID and role.
pub fn mock_user_model(id: i32, role: UserRole) -> UserModel {
    let now = Utc::now().naive_utc();
    UserModel {
        id,
        clerk_user_id: format!("user_mock_{}", id),
        email: format!("user_mock_{}@{}", id, TEST_EMAIL_DOMAIN),
        first_name: Some("Mock".to_string()),
        last_name: Some("User".to_string()),
        image_url: None,
        role,
        suspended: false,
        is_active: true,
        email_notifications: true,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    }
}
