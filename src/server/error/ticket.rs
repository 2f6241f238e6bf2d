use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::TicketStatus;
use thiserror::Error;

use crate::server::error::error_response;

/// Errors for tickets and the records that hang off them.
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Ticket ID {0:?} not found")]
    NotFound(i32),
    #[error("Ticket subject must be between 1 and {max} characters")]
    InvalidSubject { max: usize },
    #[error("Ticket description must be between 1 and {max} characters")]
    InvalidDescription { max: usize },
    #[error("Ticket cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },
    #[error("Ticket ID {0:?} is closed")]
    TicketClosed(i32),
    #[error("User ID {0:?} cannot be assigned tickets")]
    InvalidAssignee(i32),
    #[error("Comment ID {0:?} not found")]
    CommentNotFound(i32),
    #[error("Comment must be between 1 and {max} characters")]
    InvalidComment { max: usize },
    #[error("Attachment ID {0:?} not found")]
    AttachmentNotFound(i32),
    #[error("Attachment needs a ticket or a comment")]
    AttachmentWithoutParent,
    #[error("Comment ID {comment_id:?} does not belong to ticket ID {ticket_id:?}")]
    AttachmentParentMismatch { ticket_id: i32, comment_id: i32 },
    #[error("Attachment size {size} bytes is outside 1..={max} bytes")]
    InvalidAttachmentSize { size: i64, max: i64 },
    #[error("Attachment URL {0:?} must be an http(s) URL")]
    InvalidAttachmentUrl(String),
    #[error("Attachment filename and mime type must not be empty")]
    InvalidAttachmentMetadata,
    #[error("Notification ID {0:?} not found")]
    NotificationNotFound(i32),
}

impl IntoResponse for TicketError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound(_)
            | Self::CommentNotFound(_)
            | Self::AttachmentNotFound(_)
            | Self::NotificationNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } | Self::TicketClosed(_) => StatusCode::CONFLICT,
            Self::InvalidSubject { .. }
            | Self::InvalidDescription { .. }
            | Self::InvalidAssignee(_)
            | Self::InvalidComment { .. }
            | Self::AttachmentWithoutParent
            | Self::AttachmentParentMismatch { .. }
            | Self::InvalidAttachmentSize { .. }
            | Self::InvalidAttachmentUrl(_)
            | Self::InvalidAttachmentMetadata => StatusCode::BAD_REQUEST,
        };

        error_response(status, self.to_string())
    }
}
