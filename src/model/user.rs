use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub clerk_user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub role: UserRole,
    pub suspended: bool,
    pub is_active: bool,
    pub email_notifications: bool,
    pub last_login_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Public view of a user embedded in tickets and comments
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub role: UserRole,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            clerk_user_id: user.clerk_user_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            image_url: user.image_url,
            role: user.role,
            suspended: user.suspended,
            is_active: user.is_active,
            email_notifications: user.email_notifications,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

impl From<&entity::user::Model> for UserSummaryDto {
    fn from(user: &entity::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.display_name(),
            image_url: user.image_url.clone(),
            role: user.role,
        }
    }
}

/// Clerk session token exchanged for a server session
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct SignInDto {
    pub token: String,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePreferencesDto {
    pub email_notifications: bool,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRoleDto {
    pub role: UserRole,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct SetSuspendedDto {
    pub suspended: bool,
}

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct SetActiveDto {
    pub is_active: bool,
}

/// Query parameters for the admin user listing
#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub suspended: Option<bool>,
    /// Matches email, first name or last name
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}
