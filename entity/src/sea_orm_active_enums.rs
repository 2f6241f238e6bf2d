use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[sea_orm(string_value = "END_USER")]
    EndUser,
    #[sea_orm(string_value = "SUPPORT_AGENT")]
    SupportAgent,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl UserRole {
    /// Support agents and admins work tickets; end users only file them.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::SupportAgent | Self::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl TicketStatus {
    /// Whether a ticket may move from `self` to `next`.
    ///
    /// A closed ticket can only be reopened, and a status never transitions to itself.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        use TicketStatus::*;

        match (self, next) {
            (Open, InProgress | Resolved | Closed) => true,
            (InProgress, Open | Resolved | Closed) => true,
            (Resolved, Open | InProgress | Closed) => true,
            (Closed, Open) => true,
            _ => false,
        }
    }
}

/// Stored as an integer so ordering by the column orders by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    #[sea_orm(num_value = 1)]
    Low,
    #[sea_orm(num_value = 2)]
    Medium,
    #[sea_orm(num_value = 3)]
    High,
    #[sea_orm(num_value = 4)]
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    #[sea_orm(string_value = "TICKET_CREATED")]
    TicketCreated,
    #[sea_orm(string_value = "TICKET_ASSIGNED")]
    TicketAssigned,
    #[sea_orm(string_value = "TICKET_STATUS_CHANGED")]
    TicketStatusChanged,
    #[sea_orm(string_value = "TICKET_RESOLVED")]
    TicketResolved,
    #[sea_orm(string_value = "COMMENT_ADDED")]
    CommentAdded,
}
