//! In-app notification service.
//!
//! Besides the inbox operations, this module builds the notifications other services create
//! when tickets change. Those are inserted in the same transaction as the change itself.

use entity::sea_orm_active_enums::{NotificationType, TicketStatus};
use sea_orm::DatabaseConnection;

use crate::{
    model::notification::NotificationDto,
    server::{
        data::notification::{NewNotification, NotificationRepository},
        error::{ticket::TicketError, Error},
        model::{
            db::{NotificationModel, TicketModel, UserModel},
            query::{Page, PageRequest},
        },
        service::retry::RetryContext,
    },
};

/// Service for a user's own notifications.
///
/// Notifications of other users are reported as not found rather than forbidden.
pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of NotificationService.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// The actor's notifications, newest first.
    pub async fn list(
        &self,
        actor: &UserModel,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Page<NotificationDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();
        let user_id = actor.id;

        ctx.execute_with_retry(&format!("list notifications of user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let notification_repo = NotificationRepository::new(&db);
                let notifications = notification_repo
                    .find_by_user(user_id, unread_only, page)
                    .await?;

                Ok(notifications.map(NotificationDto::from))
            })
        })
        .await
    }

    pub async fn unread_count(&self, actor: &UserModel) -> Result<u64, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();
        let user_id = actor.id;

        ctx.execute_with_retry(&format!("count unread notifications of user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let notification_repo = NotificationRepository::new(&db);

                Ok(notification_repo.count_unread(user_id).await?)
            })
        })
        .await
    }

    /// Marks one of the actor's notifications as read.
    ///
    /// # Returns
    /// - `Ok(NotificationDto)` - Notification, now read
    /// - `Err(Error::TicketError(TicketError::NotificationNotFound))` - Missing or owned by someone else
    pub async fn mark_read(
        &self,
        actor: &UserModel,
        notification_id: i32,
    ) -> Result<NotificationDto, Error> {
        let notification = self.get_owned(actor, notification_id).await?;

        let notification_repo = NotificationRepository::new(self.db);
        notification_repo.mark_read(notification.id).await?;

        Ok(NotificationDto {
            is_read: true,
            ..notification.into()
        })
    }

    /// Marks every unread notification of the actor as read, returning how many changed.
    pub async fn mark_all_read(&self, actor: &UserModel) -> Result<u64, Error> {
        let notification_repo = NotificationRepository::new(self.db);

        Ok(notification_repo.mark_all_read(actor.id).await?)
    }

    pub async fn delete(&self, actor: &UserModel, notification_id: i32) -> Result<(), Error> {
        let notification = self.get_owned(actor, notification_id).await?;

        let notification_repo = NotificationRepository::new(self.db);
        notification_repo.delete(notification.id).await?;

        Ok(())
    }

    async fn get_owned(
        &self,
        actor: &UserModel,
        notification_id: i32,
    ) -> Result<NotificationModel, Error> {
        let notification_repo = NotificationRepository::new(self.db);

        match notification_repo.get_by_id(notification_id).await? {
            Some(notification) if notification.user_id == actor.id => Ok(notification),
            _ => Err(TicketError::NotificationNotFound(notification_id).into()),
        }
    }
}

/// `TICKET_CREATED` for each recipient.
pub fn ticket_created(
    ticket: &TicketModel,
    recipient_ids: impl IntoIterator<Item = i32>,
) -> Vec<NewNotification> {
    recipient_ids
        .into_iter()
        .map(|user_id| NewNotification {
            user_id,
            ticket_id: Some(ticket.id),
            r#type: NotificationType::TicketCreated,
            title: format!("New ticket #{}", ticket.id),
            message: ticket.subject.clone(),
        })
        .collect()
}

pub fn ticket_assigned(ticket: &TicketModel, assignee_id: i32) -> NewNotification {
    NewNotification {
        user_id: assignee_id,
        ticket_id: Some(ticket.id),
        r#type: NotificationType::TicketAssigned,
        title: format!("Ticket #{} was assigned to you", ticket.id),
        message: ticket.subject.clone(),
    }
}

/// `TICKET_RESOLVED` when the ticket was resolved, `TICKET_STATUS_CHANGED` otherwise.
pub fn status_changed(ticket: &TicketModel, recipient_id: i32) -> NewNotification {
    let (r#type, title) = match ticket.status {
        TicketStatus::Resolved => (
            NotificationType::TicketResolved,
            format!("Ticket #{} was resolved", ticket.id),
        ),
        status => (
            NotificationType::TicketStatusChanged,
            format!("Ticket #{} is now {}", ticket.id, status_label(status)),
        ),
    };

    NewNotification {
        user_id: recipient_id,
        ticket_id: Some(ticket.id),
        r#type,
        title,
        message: ticket.subject.clone(),
    }
}

/// `COMMENT_ADDED` for each recipient.
pub fn comment_added(
    ticket: &TicketModel,
    author: &UserModel,
    recipient_ids: impl IntoIterator<Item = i32>,
) -> Vec<NewNotification> {
    let author_name = author.display_name();

    recipient_ids
        .into_iter()
        .map(|user_id| NewNotification {
            user_id,
            ticket_id: Some(ticket.id),
            r#type: NotificationType::CommentAdded,
            title: format!("New comment on ticket #{}", ticket.id),
            message: format!("{} commented on \"{}\"", author_name, ticket.subject),
        })
        .collect()
}

fn status_label(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "open",
        TicketStatus::InProgress => "in progress",
        TicketStatus::Resolved => "resolved",
        TicketStatus::Closed => "closed",
    }
}
