//! Filtering, sorting and pagination inputs for repository queries.

use entity::sea_orm_active_enums::{TicketPriority, TicketStatus, UserRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::PageDto;

/// Ticket listing filter. Every field narrows the result set; `None` fields are ignored.
#[derive(Clone, Debug, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category_id: Option<i32>,
    pub creator_id: Option<i32>,
    pub assignee_id: Option<i32>,
    /// Only tickets without an assignee, takes precedence over `assignee_id`
    pub unassigned: bool,
    /// Substring of the subject or description
    pub search: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Priority,
    /// `upvotes - downvotes`
    Score,
    ViewCount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Defaults to newest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TicketSort {
    pub field: TicketSortField,
    pub direction: SortDirection,
}

#[derive(Clone, Debug, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub suspended: Option<bool>,
    /// Substring of the email, first name or last name
    pub search: Option<String>,
}

/// 1-based page request.
///
/// Out of range values are clamped rather than rejected: page 0 becomes page 1, `page` is
/// capped at `MAX_PAGE` so the row offset always fits in an `i64`, and `per_page` is kept
/// within `1..=MAX_PER_PAGE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: u64 = 20;
    pub const MAX_PER_PAGE: u64 = 100;
    pub const MAX_PAGE: u64 = i64::MAX as u64 / Self::MAX_PER_PAGE;

    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, Self::MAX_PAGE),
            per_page: per_page
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Zero-based page index as expected by SeaORM's paginator
    pub fn page_index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of query results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total_items,
            total_pages: total_items.div_ceil(request.per_page()),
        }
    }

    /// Convert every item while keeping the page totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

impl<T> From<Page<T>> for PageDto<T> {
    fn from(page: Page<T>) -> Self {
        PageDto {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}
