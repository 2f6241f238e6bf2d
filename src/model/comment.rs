use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    pub id: i32,
    pub ticket_id: i32,
    pub content: String,
    /// Internal notes are only visible to support agents and admins
    pub is_internal: bool,
    pub author: UserSummaryDto,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCommentDto {
    pub content: String,
    #[serde(default)]
    pub is_internal: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCommentDto {
    pub content: String,
}
