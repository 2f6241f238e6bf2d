use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AttachmentDto {
    pub id: i32,
    pub filename: String,
    pub mime_type: String,
    /// Size in bytes
    pub size: i64,
    pub url: String,
    pub ticket_id: Option<i32>,
    pub comment_id: Option<i32>,
    pub uploaded_by_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<entity::attachment::Model> for AttachmentDto {
    fn from(attachment: entity::attachment::Model) -> Self {
        Self {
            id: attachment.id,
            filename: attachment.filename,
            mime_type: attachment.mime_type,
            size: attachment.size,
            url: attachment.url,
            ticket_id: attachment.ticket_id,
            comment_id: attachment.comment_id,
            uploaded_by_id: attachment.uploaded_by_id,
            created_at: attachment.created_at,
        }
    }
}

/// Metadata of a file already stored by the upload provider.
///
/// At least one of `ticket_id` or `comment_id` is required.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAttachmentDto {
    pub ticket_id: Option<i32>,
    pub comment_id: Option<i32>,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
}
