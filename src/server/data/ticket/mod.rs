use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::{TicketPriority, TicketStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, DeleteResult, EntityTrait, IntoActiveModel, Iterable, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::server::model::query::{
    Page, PageRequest, SortDirection, TicketFilter, TicketSort, TicketSortField,
};

#[cfg(test)]
mod tests;

#[derive(Clone, Debug)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub creator_id: i32,
    pub category_id: i32,
}

/// Changes applied by [`TicketRepository::update_details`]. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct TicketChanges {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub priority: Option<TicketPriority>,
}

impl TicketChanges {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.priority.is_none()
    }
}

pub struct TicketRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TicketRepository<'a, C> {
    /// Creates a new instance of [`TicketRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an open, unassigned ticket with no votes or views
    pub async fn create(&self, new_ticket: NewTicket) -> Result<entity::ticket::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let ticket = entity::ticket::ActiveModel {
            subject: ActiveValue::Set(new_ticket.subject),
            description: ActiveValue::Set(new_ticket.description),
            status: ActiveValue::Set(TicketStatus::Open),
            priority: ActiveValue::Set(new_ticket.priority),
            creator_id: ActiveValue::Set(new_ticket.creator_id),
            assignee_id: ActiveValue::Set(None),
            category_id: ActiveValue::Set(new_ticket.category_id),
            view_count: ActiveValue::Set(0),
            upvotes: ActiveValue::Set(0),
            downvotes: ActiveValue::Set(0),
            resolved_at: ActiveValue::Set(None),
            closed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        ticket.insert(self.db).await
    }

    pub async fn get_by_id(&self, ticket_id: i32) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find_by_id(ticket_id)
            .one(self.db)
            .await
    }

    /// Reads the ticket with `SELECT ... FOR UPDATE`, so other transactions changing it wait
    /// until the surrounding transaction ends. SQLite has no row locks and already runs writers
    /// one at a time.
    pub async fn get_by_id_for_update(
        &self,
        ticket_id: i32,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find_by_id(ticket_id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Pages through tickets matching `filter` in `sort` order.
    ///
    /// Ties are broken by ticket ID in the same direction so pages are stable.
    pub async fn find_many(
        &self,
        filter: &TicketFilter,
        sort: TicketSort,
        page: PageRequest,
    ) -> Result<Page<entity::ticket::Model>, DbErr> {
        let order = match sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let query = filtered(filter);
        let query = match sort.field {
            TicketSortField::CreatedAt => {
                query.order_by(entity::ticket::Column::CreatedAt, order.clone())
            }
            TicketSortField::UpdatedAt => {
                query.order_by(entity::ticket::Column::UpdatedAt, order.clone())
            }
            TicketSortField::Priority => {
                query.order_by(entity::ticket::Column::Priority, order.clone())
            }
            TicketSortField::ViewCount => {
                query.order_by(entity::ticket::Column::ViewCount, order.clone())
            }
            TicketSortField::Score => query.order_by(Expr::cust("upvotes - downvotes"), order.clone()),
        };

        let paginator = query
            .order_by(entity::ticket::Column::Id, order)
            .paginate(self.db, page.per_page());

        let total_items = paginator.num_items().await?;
        let items = paginator.fetch_page(page.page_index()).await?;

        Ok(Page::new(items, page, total_items))
    }

    /// Number of tickets matching `filter`
    pub async fn count(&self, filter: &TicketFilter) -> Result<u64, DbErr> {
        filtered(filter).count(self.db).await
    }

    /// Returns `Ok(None)` when the ticket does not exist
    pub async fn update_details(
        &self,
        ticket_id: i32,
        changes: TicketChanges,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        let Some(ticket) = self.get_by_id(ticket_id).await? else {
            return Ok(None);
        };

        let mut ticket_am = ticket.into_active_model();
        if let Some(subject) = changes.subject {
            ticket_am.subject = ActiveValue::Set(subject);
        }
        if let Some(description) = changes.description {
            ticket_am.description = ActiveValue::Set(description);
        }
        if let Some(category_id) = changes.category_id {
            ticket_am.category_id = ActiveValue::Set(category_id);
        }
        if let Some(priority) = changes.priority {
            ticket_am.priority = ActiveValue::Set(priority);
        }
        ticket_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let ticket = ticket_am.update(self.db).await?;

        Ok(Some(ticket))
    }

    /// Moves the ticket to `status`, keeping the lifecycle timestamps consistent.
    ///
    /// Entering RESOLVED stamps `resolved_at`, entering CLOSED stamps `closed_at` and keeps
    /// `resolved_at`, entering OPEN or IN_PROGRESS clears both. Transition rules are not
    /// checked here.
    pub async fn update_status(
        &self,
        ticket_id: i32,
        status: TicketStatus,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        let Some(ticket) = self.get_by_id(ticket_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut ticket_am = ticket.into_active_model();
        ticket_am.status = ActiveValue::Set(status);

        match status {
            TicketStatus::Resolved => {
                ticket_am.resolved_at = ActiveValue::Set(Some(now));
                ticket_am.closed_at = ActiveValue::Set(None);
            }
            TicketStatus::Closed => {
                ticket_am.closed_at = ActiveValue::Set(Some(now));
            }
            TicketStatus::Open | TicketStatus::InProgress => {
                ticket_am.resolved_at = ActiveValue::Set(None);
                ticket_am.closed_at = ActiveValue::Set(None);
            }
        }
        ticket_am.updated_at = ActiveValue::Set(now);

        let ticket = ticket_am.update(self.db).await?;

        Ok(Some(ticket))
    }

    /// Sets or clears (`None`) the assignee
    pub async fn update_assignee(
        &self,
        ticket_id: i32,
        assignee_id: Option<i32>,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        let Some(ticket) = self.get_by_id(ticket_id).await? else {
            return Ok(None);
        };

        let mut ticket_am = ticket.into_active_model();
        ticket_am.assignee_id = ActiveValue::Set(assignee_id);
        ticket_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let ticket = ticket_am.update(self.db).await?;

        Ok(Some(ticket))
    }

    /// Atomically adds one view, returns the number of rows affected
    pub async fn increment_view_count(&self, ticket_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(
                entity::ticket::Column::ViewCount,
                Expr::cust("view_count + 1"),
            )
            .filter(entity::ticket::Column::Id.eq(ticket_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Overwrites the denormalized vote tallies, `updated_at` is left alone
    pub async fn set_vote_tallies(
        &self,
        ticket_id: i32,
        upvotes: i32,
        downvotes: i32,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .set(entity::ticket::ActiveModel {
                upvotes: ActiveValue::Set(upvotes),
                downvotes: ActiveValue::Set(downvotes),
                ..Default::default()
            })
            .filter(entity::ticket::Column::Id.eq(ticket_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a ticket, cascading to its comments, attachments, votes and notifications
    ///
    /// Returns OK regardless of ticket existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, ticket_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Ticket::delete_by_id(ticket_id)
            .exec(self.db)
            .await
    }

    /// Ticket count for every status, including statuses without tickets
    pub async fn count_by_status(&self) -> Result<Vec<(TicketStatus, u64)>, DbErr> {
        let mut counts = Vec::new();

        for status in TicketStatus::iter() {
            let count = entity::prelude::Ticket::find()
                .filter(entity::ticket::Column::Status.eq(status))
                .count(self.db)
                .await?;

            counts.push((status, count));
        }

        Ok(counts)
    }

    /// Ticket count for every priority, including priorities without tickets
    pub async fn count_by_priority(&self) -> Result<Vec<(TicketPriority, u64)>, DbErr> {
        let mut counts = Vec::new();

        for priority in TicketPriority::iter() {
            let count = entity::prelude::Ticket::find()
                .filter(entity::ticket::Column::Priority.eq(priority))
                .count(self.db)
                .await?;

            counts.push((priority, count));
        }

        Ok(counts)
    }

    /// `(category_id, ticket count)` for every category with at least one ticket
    pub async fn count_by_category(&self) -> Result<Vec<(i32, u64)>, DbErr> {
        let rows = entity::prelude::Ticket::find()
            .select_only()
            .column(entity::ticket::Column::CategoryId)
            .column_as(Expr::cust("COUNT(*)"), "ticket_count")
            .group_by(entity::ticket::Column::CategoryId)
            .order_by_asc(entity::ticket::Column::CategoryId)
            .into_tuple::<(i32, i64)>()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category_id, count)| (category_id, u64::try_from(count).unwrap_or(0)))
            .collect())
    }

    /// Tickets that entered RESOLVED before `cutoff` and are still resolved, locked until the
    /// surrounding transaction ends
    pub async fn find_resolved_before(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Resolved))
            .filter(entity::ticket::Column::ResolvedAt.lt(cutoff))
            .order_by_asc(entity::ticket::Column::Id)
            .lock_exclusive()
            .all(self.db)
            .await
    }

    /// Closes each given ticket that is still RESOLVED, returns the IDs it closed
    pub async fn close_many(&self, ticket_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        let now = Utc::now().naive_utc();
        let mut closed = Vec::new();

        for &ticket_id in ticket_ids {
            let result = entity::prelude::Ticket::update_many()
                .set(entity::ticket::ActiveModel {
                    status: ActiveValue::Set(TicketStatus::Closed),
                    closed_at: ActiveValue::Set(Some(now)),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                })
                .filter(entity::ticket::Column::Id.eq(ticket_id))
                .filter(entity::ticket::Column::Status.eq(TicketStatus::Resolved))
                .exec(self.db)
                .await?;

            if result.rows_affected > 0 {
                closed.push(ticket_id);
            }
        }

        Ok(closed)
    }
}

/// Base ticket query with `filter` applied
fn filtered(filter: &TicketFilter) -> Select<entity::ticket::Entity> {
    let mut query = entity::prelude::Ticket::find();

    if let Some(status) = filter.status {
        query = query.filter(entity::ticket::Column::Status.eq(status));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(entity::ticket::Column::Priority.eq(priority));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(entity::ticket::Column::CategoryId.eq(category_id));
    }
    if let Some(creator_id) = filter.creator_id {
        query = query.filter(entity::ticket::Column::CreatorId.eq(creator_id));
    }
    if filter.unassigned {
        query = query.filter(entity::ticket::Column::AssigneeId.is_null());
    } else if let Some(assignee_id) = filter.assignee_id {
        query = query.filter(entity::ticket::Column::AssigneeId.eq(assignee_id));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            query = query.filter(
                Condition::any()
                    .add(entity::ticket::Column::Subject.contains(search))
                    .add(entity::ticket::Column::Description.contains(search)),
            );
        }
    }

    query
}
