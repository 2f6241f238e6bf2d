use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::NotificationType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub r#type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub ticket_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl From<entity::notification::Model> for NotificationDto {
    fn from(notification: entity::notification::Model) -> Self {
        Self {
            id: notification.id,
            r#type: notification.r#type,
            title: notification.title,
            message: notification.message,
            is_read: notification.is_read,
            ticket_id: notification.ticket_id,
            created_at: notification.created_at,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}
