//! Ticket fixture utilities.
//!
//! Tickets own comments, votes, attachments and notifications, so the fixtures for those
//! records live here as well. Vote fixtures do not touch the ticket's tallies; tests that
//! care about tallies should go through the vote repository instead.

use chrono::Utc;
use entity::sea_orm_active_enums::{NotificationType, TicketPriority, TicketStatus};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{AttachmentModel, CommentModel, NotificationModel, TicketModel, VoteModel},
    TestContext,
};

impl TestContext {
    pub fn ticket<'a>(&'a mut self) -> TicketFixtures<'a> {
        TicketFixtures { setup: self }
    }
}

pub struct TicketFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> TicketFixtures<'a> {
    /// Insert an open, medium priority, unassigned ticket.
    pub async fn insert_ticket(
        &mut self,
        creator_id: i32,
        category_id: i32,
    ) -> Result<TicketModel, TestError> {
        self.insert_ticket_with_status(creator_id, category_id, TicketStatus::Open)
            .await
    }

    /// Insert an unassigned ticket with the given status.
    ///
    /// `resolved_at` and `closed_at` are filled in to match the status.
    pub async fn insert_ticket_with_status(
        &mut self,
        creator_id: i32,
        category_id: i32,
        status: TicketStatus,
    ) -> Result<TicketModel, TestError> {
        let sequence = self.setup.next_sequence();
        let now = Utc::now().naive_utc();

        let resolved_at = match status {
            TicketStatus::Resolved | TicketStatus::Closed => Some(now),
            _ => None,
        };
        let closed_at = match status {
            TicketStatus::Closed => Some(now),
            _ => None,
        };

        Ok(entity::prelude::Ticket::insert(entity::ticket::ActiveModel {
            subject: ActiveValue::Set(format!("Test ticket {}", sequence)),
            description: ActiveValue::Set(format!("Description for test ticket {}", sequence)),
            status: ActiveValue::Set(status),
            priority: ActiveValue::Set(TicketPriority::Medium),
            creator_id: ActiveValue::Set(creator_id),
            assignee_id: ActiveValue::Set(None),
            category_id: ActiveValue::Set(category_id),
            view_count: ActiveValue::Set(0),
            upvotes: ActiveValue::Set(0),
            downvotes: ActiveValue::Set(0),
            resolved_at: ActiveValue::Set(resolved_at),
            closed_at: ActiveValue::Set(closed_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Assign an existing ticket to a user without changing its status.
    pub async fn assign_ticket(
        &mut self,
        ticket_id: i32,
        assignee_id: i32,
    ) -> Result<TicketModel, TestError> {
        Ok(entity::prelude::Ticket::update(entity::ticket::ActiveModel {
            id: ActiveValue::Unchanged(ticket_id),
            assignee_id: ActiveValue::Set(Some(assignee_id)),
            ..Default::default()
        })
        .exec(&self.setup.db)
        .await?)
    }

    /// Insert a comment on a ticket.
    pub async fn insert_comment(
        &mut self,
        ticket_id: i32,
        author_id: i32,
        is_internal: bool,
    ) -> Result<CommentModel, TestError> {
        let sequence = self.setup.next_sequence();
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Comment::insert(entity::comment::ActiveModel {
                content: ActiveValue::Set(format!("Test comment {}", sequence)),
                is_internal: ActiveValue::Set(is_internal),
                ticket_id: ActiveValue::Set(ticket_id),
                author_id: ActiveValue::Set(author_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a raw vote row.
    pub async fn insert_vote(
        &mut self,
        ticket_id: i32,
        user_id: i32,
        is_upvote: bool,
    ) -> Result<VoteModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Vote::insert(entity::vote::ActiveModel {
            is_upvote: ActiveValue::Set(is_upvote),
            ticket_id: ActiveValue::Set(ticket_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert attachment metadata attached to a ticket and/or a comment.
    pub async fn insert_attachment(
        &mut self,
        ticket_id: Option<i32>,
        comment_id: Option<i32>,
        uploaded_by_id: i32,
    ) -> Result<AttachmentModel, TestError> {
        let sequence = self.setup.next_sequence();

        Ok(
            entity::prelude::Attachment::insert(entity::attachment::ActiveModel {
                filename: ActiveValue::Set(format!("attachment-{}.png", sequence)),
                mime_type: ActiveValue::Set("image/png".to_string()),
                size: ActiveValue::Set(1024),
                url: ActiveValue::Set(format!(
                    "https://files.helpdesk.test/attachment-{}.png",
                    sequence
                )),
                ticket_id: ActiveValue::Set(ticket_id),
                comment_id: ActiveValue::Set(comment_id),
                uploaded_by_id: ActiveValue::Set(uploaded_by_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an unread notification for a user about a ticket.
    pub async fn insert_notification(
        &mut self,
        user_id: i32,
        ticket_id: Option<i32>,
        notification_type: NotificationType,
    ) -> Result<NotificationModel, TestError> {
        let sequence = self.setup.next_sequence();

        Ok(
            entity::prelude::Notification::insert(entity::notification::ActiveModel {
                r#type: ActiveValue::Set(notification_type),
                title: ActiveValue::Set(format!("Test notification {}", sequence)),
                message: ActiveValue::Set("Something happened on a ticket".to_string()),
                is_read: ActiveValue::Set(false),
                user_id: ActiveValue::Set(user_id),
                ticket_id: ActiveValue::Set(ticket_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
