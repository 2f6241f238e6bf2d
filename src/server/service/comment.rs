//! Ticket comment service.
//!
//! Internal comments are notes between staff: only staff post or see them, and they only
//! notify the assignee.

use std::collections::HashMap;

use entity::sea_orm_active_enums::{TicketStatus, UserRole};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::comment::{CommentDto, CreateCommentDto},
    server::{
        data::{
            comment::CommentRepository, notification::NotificationRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, ticket::TicketError, Error},
        model::db::{CommentModel, UserModel},
        service::{notification, retry::RetryContext, ticket::get_ticket},
    },
};

pub const MAX_COMMENT_LENGTH: usize = 5_000;

/// Service for commenting on tickets.
pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentService<'a> {
    /// Creates a new instance of CommentService.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Comments of a ticket, oldest first. Internal comments are left out for end users.
    pub async fn list(&self, actor: &UserModel, ticket_id: i32) -> Result<Vec<CommentDto>, Error> {
        let include_internal = actor.role.is_staff();

        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("list comments of ticket ID {}", ticket_id), || {
            let db = db.clone();

            Box::pin(async move {
                get_ticket(&db, ticket_id).await?;

                let comments = CommentRepository::new(&db)
                    .find_by_ticket(ticket_id, include_internal)
                    .await?;

                to_comment_dtos(&db, comments).await
            })
        })
        .await
    }

    /// Adds a comment and notifies the people following the ticket.
    ///
    /// Public comments notify the creator and the assignee, internal comments only the
    /// assignee. The author is never notified of their own comment.
    ///
    /// # Returns
    /// - `Ok(CommentDto)` - Created comment
    /// - `Err(Error::TicketError(TicketError::InvalidComment))` - Content empty or too long
    /// - `Err(Error::AuthError(AuthError::Forbidden))` - End user posting an internal comment
    /// - `Err(Error::TicketError(TicketError::TicketClosed))` - Ticket is closed
    pub async fn add(
        &self,
        actor: &UserModel,
        ticket_id: i32,
        payload: CreateCommentDto,
    ) -> Result<CommentDto, Error> {
        let content = validate_content(&payload.content)?;
        if payload.is_internal && !actor.role.is_staff() {
            return Err(AuthError::forbidden(actor.id, "post internal comments").into());
        }

        let ticket = get_ticket(self.db, ticket_id).await?;
        if ticket.status == TicketStatus::Closed {
            return Err(TicketError::TicketClosed(ticket_id).into());
        }

        let mut recipients = Vec::new();
        if !payload.is_internal {
            recipients.push(ticket.creator_id);
        }
        recipients.extend(ticket.assignee_id);
        recipients.retain(|user_id| *user_id != actor.id);
        recipients.dedup();

        let txn = self.db.begin().await?;

        let comment = CommentRepository::new(&txn)
            .create(ticket_id, actor.id, content, payload.is_internal)
            .await?;
        NotificationRepository::new(&txn)
            .create_many(notification::comment_added(&ticket, actor, recipients))
            .await?;

        txn.commit().await?;

        Ok(comment_dto(comment, actor))
    }

    /// Replaces the content of the actor's own comment.
    pub async fn edit(
        &self,
        actor: &UserModel,
        comment_id: i32,
        content: String,
    ) -> Result<CommentDto, Error> {
        let content = validate_content(&content)?;
        let comment = self.get_comment(comment_id).await?;

        if comment.author_id != actor.id {
            return Err(AuthError::forbidden(actor.id, "edit this comment").into());
        }

        let comment = CommentRepository::new(self.db)
            .update_content(comment_id, content)
            .await?
            .ok_or(TicketError::CommentNotFound(comment_id))?;

        Ok(comment_dto(comment, actor))
    }

    /// Deletes a comment. Authors delete their own, admins any.
    pub async fn delete(&self, actor: &UserModel, comment_id: i32) -> Result<(), Error> {
        let comment = self.get_comment(comment_id).await?;

        if comment.author_id != actor.id && actor.role != UserRole::Admin {
            return Err(AuthError::forbidden(actor.id, "delete this comment").into());
        }

        CommentRepository::new(self.db).delete(comment_id).await?;

        Ok(())
    }

    async fn get_comment(&self, comment_id: i32) -> Result<CommentModel, Error> {
        CommentRepository::new(self.db)
            .get_by_id(comment_id)
            .await?
            .ok_or_else(|| TicketError::CommentNotFound(comment_id).into())
    }
}

fn comment_dto(comment: CommentModel, author: &UserModel) -> CommentDto {
    CommentDto {
        id: comment.id,
        ticket_id: comment.ticket_id,
        content: comment.content,
        is_internal: comment.is_internal,
        author: author.into(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

async fn to_comment_dtos<C: ConnectionTrait>(
    db: &C,
    comments: Vec<CommentModel>,
) -> Result<Vec<CommentDto>, Error> {
    let mut author_ids: Vec<i32> = comments.iter().map(|comment| comment.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors: HashMap<i32, UserModel> = UserRepository::new(db)
        .get_many_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    comments
        .into_iter()
        .map(|comment| {
            let author = authors.get(&comment.author_id).ok_or_else(|| {
                Error::InternalError(format!(
                    "Author user ID {} of comment ID {} not found",
                    comment.author_id, comment.id
                ))
            })?;

            Ok(comment_dto(comment, author))
        })
        .collect()
}

fn validate_content(content: &str) -> Result<String, TicketError> {
    let content = content.trim();
    let length = content.chars().count();

    if length == 0 || length > MAX_COMMENT_LENGTH {
        return Err(TicketError::InvalidComment {
            max: MAX_COMMENT_LENGTH,
        });
    }

    Ok(content.to_string())
}
