//! Attachment metadata service.
//!
//! Files are uploaded to external storage by the client; the helpdesk only records where they
//! live and what they are attached to.

use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;
use url::Url;

use crate::{
    model::attachment::{AttachmentDto, CreateAttachmentDto},
    server::{
        data::{
            attachment::{AttachmentRepository, NewAttachment},
            comment::CommentRepository,
        },
        error::{auth::AuthError, ticket::TicketError, Error},
        model::db::UserModel,
        service::{retry::RetryContext, ticket::get_ticket},
    },
};

/// Service for attaching files to tickets and comments.
pub struct AttachmentService<'a> {
    db: &'a DatabaseConnection,
    /// Largest accepted attachment in bytes
    max_size: i64,
}

impl<'a> AttachmentService<'a> {
    /// Creates a new instance of AttachmentService.
    pub fn new(db: &'a DatabaseConnection, max_size: i64) -> Self {
        Self { db, max_size }
    }

    /// Records an uploaded file on a ticket, a comment or both.
    ///
    /// When both are given the comment must belong to the ticket. Attachments on internal
    /// comments can only be added by staff; for anyone else the comment does not exist.
    ///
    /// # Returns
    /// - `Ok(AttachmentDto)` - Recorded attachment
    /// - `Err(Error::TicketError(TicketError::AttachmentWithoutParent))` - Neither ticket nor comment given
    /// - `Err(Error::TicketError(TicketError::AttachmentParentMismatch))` - Comment is on another ticket
    /// - `Err(Error::TicketError(TicketError::InvalidAttachmentSize))` - Size outside `1..=max`
    /// - `Err(Error::TicketError(TicketError::InvalidAttachmentUrl))` - URL is not http(s)
    pub async fn add(
        &self,
        actor: &UserModel,
        payload: CreateAttachmentDto,
    ) -> Result<AttachmentDto, Error> {
        if payload.ticket_id.is_none() && payload.comment_id.is_none() {
            return Err(TicketError::AttachmentWithoutParent.into());
        }

        let filename = payload.filename.trim().to_string();
        let mime_type = payload.mime_type.trim().to_string();
        let url = payload.url.trim().to_string();
        if filename.is_empty() || mime_type.is_empty() {
            return Err(TicketError::InvalidAttachmentMetadata.into());
        }
        if payload.size < 1 || payload.size > self.max_size {
            return Err(TicketError::InvalidAttachmentSize {
                size: payload.size,
                max: self.max_size,
            }
            .into());
        }
        if !is_http_url(&url) {
            return Err(TicketError::InvalidAttachmentUrl(url).into());
        }

        if let Some(ticket_id) = payload.ticket_id {
            get_ticket(self.db, ticket_id).await?;
        }
        if let Some(comment_id) = payload.comment_id {
            let comment = CommentRepository::new(self.db)
                .get_by_id(comment_id)
                .await?
                .filter(|comment| !comment.is_internal || actor.role.is_staff())
                .ok_or(TicketError::CommentNotFound(comment_id))?;

            if let Some(ticket_id) = payload.ticket_id {
                if comment.ticket_id != ticket_id {
                    return Err(TicketError::AttachmentParentMismatch {
                        ticket_id,
                        comment_id,
                    }
                    .into());
                }
            }
        }

        let attachment = AttachmentRepository::new(self.db)
            .create(NewAttachment {
                filename,
                mime_type,
                size: payload.size,
                url,
                ticket_id: payload.ticket_id,
                comment_id: payload.comment_id,
                uploaded_by_id: actor.id,
            })
            .await?;

        Ok(attachment.into())
    }

    /// Attachments of the ticket and of the comments the actor can see.
    pub async fn list_for_ticket(
        &self,
        actor: &UserModel,
        ticket_id: i32,
    ) -> Result<Vec<AttachmentDto>, Error> {
        let include_internal = actor.role.is_staff();

        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("list attachments of ticket ID {}", ticket_id), || {
            let db = db.clone();

            Box::pin(async move {
                get_ticket(&db, ticket_id).await?;

                let attachments = AttachmentRepository::new(&db)
                    .find_by_ticket(ticket_id, include_internal)
                    .await?;

                Ok(attachments.into_iter().map(AttachmentDto::from).collect())
            })
        })
        .await
    }

    /// Deletes an attachment. Uploaders delete their own, admins any.
    pub async fn delete(&self, actor: &UserModel, attachment_id: i32) -> Result<(), Error> {
        let attachment_repo = AttachmentRepository::new(self.db);
        let attachment = attachment_repo
            .get_by_id(attachment_id)
            .await?
            .ok_or(TicketError::AttachmentNotFound(attachment_id))?;

        if attachment.uploaded_by_id != actor.id && actor.role != UserRole::Admin {
            return Err(AuthError::forbidden(actor.id, "delete this attachment").into());
        }

        attachment_repo.delete(attachment_id).await?;

        Ok(())
    }
}

/// Absolute `http` or `https` URL with a non-empty host.
fn is_http_url(url: &str) -> bool {
    let Ok(url) = Url::parse(url) else {
        return false;
    };

    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty())
}
