//! Ticket service.
//!
//! Enforces who may do what with a ticket, validates input and keeps the notifications that
//! accompany each change in the same transaction as the change.

use std::collections::HashMap;

use entity::sea_orm_active_enums::{TicketPriority, TicketStatus, UserRole};
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{
    model::{
        category::CategorySummaryDto,
        ticket::{
            CategoryCountDto, CreateTicketDto, PriorityCountDto, StatusCountDto, TicketDto,
            TicketStatsDto, UpdateTicketDto,
        },
        user::UserSummaryDto,
    },
    server::{
        data::{
            category::CategoryRepository,
            comment::CommentRepository,
            notification::NotificationRepository,
            ticket::{NewTicket, TicketChanges, TicketRepository},
            user::UserRepository,
        },
        error::{auth::AuthError, category::CategoryError, ticket::TicketError, Error},
        model::{
            db::{TicketModel, UserModel},
            query::{Page, PageRequest, TicketFilter, TicketSort},
        },
        service::{notification, retry::RetryContext},
        util::permission::require_staff,
    },
};

pub const MAX_SUBJECT_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Service for the ticket lifecycle.
pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketService<'a> {
    /// Creates a new instance of TicketService.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new OPEN ticket and notifies staff.
    ///
    /// # Returns
    /// - `Ok(TicketDto)` - Created ticket
    /// - `Err(Error::TicketError(TicketError::InvalidSubject | InvalidDescription))` - Validation failed
    /// - `Err(Error::CategoryError(CategoryError::NotFound))` - Category does not exist
    /// - `Err(Error::CategoryError(CategoryError::Inactive))` - Category was deactivated
    pub async fn create(
        &self,
        actor: &UserModel,
        payload: CreateTicketDto,
    ) -> Result<TicketDto, Error> {
        let subject = validate_subject(&payload.subject)?;
        let description = validate_description(&payload.description)?;
        ensure_category_accepts_tickets(self.db, payload.category_id).await?;

        let txn = self.db.begin().await?;

        let ticket_repo = TicketRepository::new(&txn);
        let ticket = ticket_repo
            .create(NewTicket {
                subject,
                description,
                priority: payload.priority.unwrap_or(TicketPriority::Medium),
                creator_id: actor.id,
                category_id: payload.category_id,
            })
            .await?;

        let staff = UserRepository::new(&txn).find_staff().await?;
        let recipients = staff
            .iter()
            .map(|user| user.id)
            .filter(|user_id| *user_id != actor.id);
        NotificationRepository::new(&txn)
            .create_many(notification::ticket_created(&ticket, recipients))
            .await?;

        txn.commit().await?;

        tracing::debug!("User ID {} created ticket ID {}", actor.id, ticket.id);

        to_ticket_dto(self.db, ticket).await
    }

    /// Fetches a ticket, counting the view.
    pub async fn get(&self, _actor: &UserModel, ticket_id: i32) -> Result<TicketDto, Error> {
        let ticket_repo = TicketRepository::new(self.db);
        if ticket_repo.increment_view_count(ticket_id).await? == 0 {
            return Err(TicketError::NotFound(ticket_id).into());
        }

        let ticket = get_ticket(self.db, ticket_id).await?;

        to_ticket_dto(self.db, ticket).await
    }

    /// Pages through tickets matching `filter`. Every signed in user may list tickets.
    pub async fn list(
        &self,
        filter: TicketFilter,
        sort: TicketSort,
        page: PageRequest,
    ) -> Result<Page<TicketDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list tickets", || {
            let db = db.clone();
            let filter = filter.clone();

            Box::pin(async move {
                let ticket_repo = TicketRepository::new(&db);
                let tickets = ticket_repo.find_many(&filter, sort, page).await?;

                let items = to_ticket_dtos(&db, tickets.items.clone()).await?;

                Ok(Page {
                    items,
                    page: tickets.page,
                    per_page: tickets.per_page,
                    total_items: tickets.total_items,
                    total_pages: tickets.total_pages,
                })
            })
        })
        .await
    }

    /// Edits subject, description, category or priority.
    ///
    /// The creator may edit while the ticket is OPEN, staff at any time. Only staff change
    /// priority.
    pub async fn update_details(
        &self,
        actor: &UserModel,
        ticket_id: i32,
        payload: UpdateTicketDto,
    ) -> Result<TicketDto, Error> {
        let ticket = get_ticket(self.db, ticket_id).await?;

        let is_staff = actor.role.is_staff();
        let is_editable_by_creator =
            ticket.creator_id == actor.id && ticket.status == TicketStatus::Open;
        if !is_staff && !is_editable_by_creator {
            return Err(AuthError::forbidden(actor.id, "edit this ticket").into());
        }
        if payload.priority.is_some() && !is_staff {
            return Err(AuthError::forbidden(actor.id, "change ticket priority").into());
        }

        let changes = TicketChanges {
            subject: payload.subject.as_deref().map(validate_subject).transpose()?,
            description: payload
                .description
                .as_deref()
                .map(validate_description)
                .transpose()?,
            category_id: payload.category_id,
            priority: payload.priority,
        };

        if changes.is_empty() {
            return to_ticket_dto(self.db, ticket).await;
        }

        if let Some(category_id) = changes.category_id {
            if category_id != ticket.category_id {
                ensure_category_accepts_tickets(self.db, category_id).await?;
            }
        }

        let ticket_repo = TicketRepository::new(self.db);
        let ticket = ticket_repo
            .update_details(ticket_id, changes)
            .await?
            .ok_or(TicketError::NotFound(ticket_id))?;

        to_ticket_dto(self.db, ticket).await
    }

    /// Moves a ticket to another status.
    ///
    /// Staff may make any valid transition. The creator may close their ticket or reopen it
    /// once it is RESOLVED or CLOSED. The creator is notified of changes made by others.
    ///
    /// # Returns
    /// - `Ok(TicketDto)` - Ticket in its new status
    /// - `Err(Error::TicketError(TicketError::InvalidTransition))` - Transition not allowed from the current status
    /// - `Err(Error::AuthError(AuthError::Forbidden))` - Actor may not make this transition
    pub async fn change_status(
        &self,
        actor: &UserModel,
        ticket_id: i32,
        status: TicketStatus,
    ) -> Result<TicketDto, Error> {
        let txn = self.db.begin().await?;
        let ticket_repo = TicketRepository::new(&txn);

        let ticket = get_ticket_for_update(&txn, ticket_id).await?;

        if !ticket.status.can_transition_to(status) {
            return Err(TicketError::InvalidTransition {
                from: ticket.status,
                to: status,
            }
            .into());
        }

        if !actor.role.is_staff() {
            let is_creator = ticket.creator_id == actor.id;
            let closes = status == TicketStatus::Closed;
            let reopens = status == TicketStatus::Open
                && matches!(ticket.status, TicketStatus::Resolved | TicketStatus::Closed);

            if !is_creator || !(closes || reopens) {
                return Err(AuthError::forbidden(actor.id, "change the status of this ticket").into());
            }
        }

        let ticket = ticket_repo
            .update_status(ticket_id, status)
            .await?
            .ok_or(TicketError::NotFound(ticket_id))?;

        if ticket.creator_id != actor.id {
            NotificationRepository::new(&txn)
                .create(notification::status_changed(&ticket, ticket.creator_id))
                .await?;
        }

        txn.commit().await?;

        tracing::debug!(
            "User ID {} moved ticket ID {} to {:?}",
            actor.id,
            ticket_id,
            status
        );

        to_ticket_dto(self.db, ticket).await
    }

    /// Assigns the ticket to a staff member, or unassigns it with `None`. Staff only.
    ///
    /// Assigning an OPEN ticket moves it to IN_PROGRESS.
    ///
    /// # Returns
    /// - `Ok(TicketDto)` - Updated ticket
    /// - `Err(Error::TicketError(TicketError::InvalidAssignee))` - Assignee missing, not staff, inactive or suspended
    pub async fn assign(
        &self,
        actor: &UserModel,
        ticket_id: i32,
        assignee_id: Option<i32>,
    ) -> Result<TicketDto, Error> {
        require_staff(actor, "assign tickets")?;

        if let Some(assignee_id) = assignee_id {
            let assignee = UserRepository::new(self.db).get_by_id(assignee_id).await?;
            let assignable = assignee.is_some_and(|user| {
                user.role.is_staff() && user.is_active && !user.suspended
            });
            if !assignable {
                return Err(TicketError::InvalidAssignee(assignee_id).into());
            }
        }

        let txn = self.db.begin().await?;
        let ticket_repo = TicketRepository::new(&txn);

        // The OPEN check below must see the status as of this transaction
        let ticket = get_ticket_for_update(&txn, ticket_id).await?;

        let mut updated = ticket_repo
            .update_assignee(ticket_id, assignee_id)
            .await?
            .ok_or(TicketError::NotFound(ticket_id))?;

        if let Some(assignee_id) = assignee_id {
            if ticket.status == TicketStatus::Open {
                updated = ticket_repo
                    .update_status(ticket_id, TicketStatus::InProgress)
                    .await?
                    .ok_or(TicketError::NotFound(ticket_id))?;
            }

            if assignee_id != actor.id {
                NotificationRepository::new(&txn)
                    .create(notification::ticket_assigned(&updated, assignee_id))
                    .await?;
            }
        }

        txn.commit().await?;

        tracing::debug!(
            "User ID {} set assignee of ticket ID {} to {:?}",
            actor.id,
            ticket_id,
            assignee_id
        );

        to_ticket_dto(self.db, updated).await
    }

    /// Deletes a ticket with everything attached to it.
    ///
    /// Admins may delete any ticket. The creator may delete their ticket while it is OPEN and
    /// nobody else has commented on it.
    pub async fn delete(&self, actor: &UserModel, ticket_id: i32) -> Result<(), Error> {
        let ticket = get_ticket(self.db, ticket_id).await?;

        if actor.role != UserRole::Admin {
            let is_creator = ticket.creator_id == actor.id;
            let untouched = ticket.status == TicketStatus::Open
                && CommentRepository::new(self.db)
                    .count_by_others(ticket_id, actor.id)
                    .await?
                    == 0;

            if !is_creator || !untouched {
                return Err(AuthError::forbidden(actor.id, "delete this ticket").into());
            }
        }

        TicketRepository::new(self.db).delete(ticket_id).await?;

        tracing::info!("User ID {} deleted ticket ID {}", actor.id, ticket_id);

        Ok(())
    }

    /// Ticket counts grouped by status, priority and category. Staff only.
    pub async fn stats(&self, actor: &UserModel) -> Result<TicketStatsDto, Error> {
        require_staff(actor, "view ticket statistics")?;

        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("ticket statistics", || {
            let db = db.clone();

            Box::pin(async move {
                let ticket_repo = TicketRepository::new(&db);
                let total = ticket_repo.count(&TicketFilter::default()).await?;

                let by_status = ticket_repo
                    .count_by_status()
                    .await?
                    .into_iter()
                    .map(|(status, count)| StatusCountDto { status, count })
                    .collect();
                let by_priority = ticket_repo
                    .count_by_priority()
                    .await?
                    .into_iter()
                    .map(|(priority, count)| PriorityCountDto { priority, count })
                    .collect();

                let categories: HashMap<i32, CategorySummaryDto> = CategoryRepository::new(&db)
                    .find_many(true)
                    .await?
                    .iter()
                    .map(|category| (category.id, CategorySummaryDto::from(category)))
                    .collect();
                let by_category = ticket_repo
                    .count_by_category()
                    .await?
                    .into_iter()
                    .filter_map(|(category_id, count)| {
                        categories
                            .get(&category_id)
                            .cloned()
                            .map(|category| CategoryCountDto { category, count })
                    })
                    .collect();

                Ok(TicketStatsDto {
                    total,
                    by_status,
                    by_priority,
                    by_category,
                })
            })
        })
        .await
    }
}

/// Loads a ticket or fails with [`TicketError::NotFound`].
pub(crate) async fn get_ticket<C: ConnectionTrait>(
    db: &C,
    ticket_id: i32,
) -> Result<TicketModel, Error> {
    TicketRepository::new(db)
        .get_by_id(ticket_id)
        .await?
        .ok_or_else(|| TicketError::NotFound(ticket_id).into())
}

/// Like [`get_ticket`] but holds a row lock until `txn` ends
pub(crate) async fn get_ticket_for_update(
    txn: &DatabaseTransaction,
    ticket_id: i32,
) -> Result<TicketModel, Error> {
    TicketRepository::new(txn)
        .get_by_id_for_update(ticket_id)
        .await?
        .ok_or_else(|| TicketError::NotFound(ticket_id).into())
}

async fn ensure_category_accepts_tickets<C: ConnectionTrait>(
    db: &C,
    category_id: i32,
) -> Result<(), Error> {
    let category = CategoryRepository::new(db)
        .get_by_id(category_id)
        .await?
        .ok_or(CategoryError::NotFound(category_id))?;

    if !category.is_active {
        return Err(CategoryError::Inactive(category_id).into());
    }

    Ok(())
}

async fn to_ticket_dto<C: ConnectionTrait>(db: &C, ticket: TicketModel) -> Result<TicketDto, Error> {
    let ticket_id = ticket.id;

    to_ticket_dtos(db, vec![ticket])
        .await?
        .pop()
        .ok_or_else(|| Error::InternalError(format!("Lost ticket ID {} while building DTO", ticket_id)))
}

/// Joins creator, assignee and category summaries onto tickets, keeping their order.
async fn to_ticket_dtos<C: ConnectionTrait>(
    db: &C,
    tickets: Vec<TicketModel>,
) -> Result<Vec<TicketDto>, Error> {
    if tickets.is_empty() {
        return Ok(Vec::new());
    }

    let mut user_ids: Vec<i32> = tickets
        .iter()
        .flat_map(|ticket| std::iter::once(ticket.creator_id).chain(ticket.assignee_id))
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let users: HashMap<i32, UserSummaryDto> = UserRepository::new(db)
        .get_many_by_ids(&user_ids)
        .await?
        .iter()
        .map(|user| (user.id, UserSummaryDto::from(user)))
        .collect();
    let categories: HashMap<i32, CategorySummaryDto> = CategoryRepository::new(db)
        .find_many(true)
        .await?
        .iter()
        .map(|category| (category.id, CategorySummaryDto::from(category)))
        .collect();

    tickets
        .into_iter()
        .map(|ticket| {
            let score = ticket.score();
            let creator = users.get(&ticket.creator_id).cloned().ok_or_else(|| {
                Error::InternalError(format!(
                    "Creator user ID {} of ticket ID {} not found",
                    ticket.creator_id, ticket.id
                ))
            })?;
            let category = categories.get(&ticket.category_id).cloned().ok_or_else(|| {
                Error::InternalError(format!(
                    "Category ID {} of ticket ID {} not found",
                    ticket.category_id, ticket.id
                ))
            })?;
            let assignee = ticket
                .assignee_id
                .and_then(|assignee_id| users.get(&assignee_id).cloned());

            Ok(TicketDto {
                id: ticket.id,
                subject: ticket.subject,
                description: ticket.description,
                status: ticket.status,
                priority: ticket.priority,
                creator,
                assignee,
                category,
                view_count: ticket.view_count,
                upvotes: ticket.upvotes,
                downvotes: ticket.downvotes,
                score,
                resolved_at: ticket.resolved_at,
                closed_at: ticket.closed_at,
                created_at: ticket.created_at,
                updated_at: ticket.updated_at,
            })
        })
        .collect()
}

fn validate_subject(subject: &str) -> Result<String, TicketError> {
    let subject = subject.trim();
    let length = subject.chars().count();

    if length == 0 || length > MAX_SUBJECT_LENGTH {
        return Err(TicketError::InvalidSubject {
            max: MAX_SUBJECT_LENGTH,
        });
    }

    Ok(subject.to_string())
}

fn validate_description(description: &str) -> Result<String, TicketError> {
    let description = description.trim();
    let length = description.chars().count();

    if length == 0 || length > MAX_DESCRIPTION_LENGTH {
        return Err(TicketError::InvalidDescription {
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(description.to_string())
}
