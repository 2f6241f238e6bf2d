use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{TicketPriority, TicketStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    model::{category::CategorySummaryDto, user::UserSummaryDto},
    server::model::query::{SortDirection, TicketSortField},
};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketDto {
    pub id: i32,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub creator: UserSummaryDto,
    pub assignee: Option<UserSummaryDto>,
    pub category: CategorySummaryDto,
    pub view_count: i32,
    pub upvotes: i32,
    pub downvotes: i32,
    /// `upvotes - downvotes`
    pub score: i32,
    pub resolved_at: Option<NaiveDateTime>,
    pub closed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTicketDto {
    pub subject: String,
    pub description: String,
    pub category_id: i32,
    /// Defaults to `MEDIUM`
    pub priority: Option<TicketPriority>,
}

/// Fields left out are not changed.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTicketDto {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    /// Staff only
    pub priority: Option<TicketPriority>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ChangeStatusDto {
    pub status: TicketStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignTicketDto {
    /// `null` unassigns the ticket
    pub assignee_id: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CastVoteDto {
    pub is_upvote: bool,
}

/// Vote tallies of a ticket and the requesting user's own vote
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct VoteSummaryDto {
    pub ticket_id: i32,
    pub upvotes: i32,
    pub downvotes: i32,
    pub score: i32,
    /// `Some(true)` for an upvote, `Some(false)` for a downvote, `None` when not voted
    pub user_vote: Option<bool>,
}

/// Query parameters for ticket listing
#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketListQuery {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category_id: Option<i32>,
    pub creator_id: Option<i32>,
    pub assignee_id: Option<i32>,
    /// Only tickets without an assignee
    pub unassigned: Option<bool>,
    /// Matches subject or description
    pub search: Option<String>,
    pub sort: Option<TicketSortField>,
    pub direction: Option<SortDirection>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: TicketStatus,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PriorityCountDto {
    pub priority: TicketPriority,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountDto {
    pub category: CategorySummaryDto,
    pub count: u64,
}

/// Ticket counts grouped by status, priority and category
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketStatsDto {
    pub total: u64,
    pub by_status: Vec<StatusCountDto>,
    pub by_priority: Vec<PriorityCountDto>,
    pub by_category: Vec<CategoryCountDto>,
}
