use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PageDto},
        ticket::{
            AssignTicketDto, ChangeStatusDto, CreateTicketDto, TicketDto, TicketListQuery,
            TicketStatsDto, UpdateTicketDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::{
            app::AppState,
            query::{PageRequest, TicketFilter, TicketSort},
        },
        service::ticket::TicketService,
    },
};

pub static TICKET_TAG: &str = "ticket";

/// List tickets
///
/// Filters combine; `unassigned=true` takes precedence over `assignee_id`. Defaults to newest
/// first.
#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = TICKET_TAG,
    params(TicketListQuery),
    responses(
        (status = 200, description = "Page of tickets", body = PageDto<TicketDto>),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TicketListQuery>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let filter = TicketFilter {
        status: query.status,
        priority: query.priority,
        category_id: query.category_id,
        creator_id: query.creator_id,
        assignee_id: query.assignee_id,
        unassigned: query.unassigned.unwrap_or(false),
        search: query.search,
    };
    let sort = TicketSort {
        field: query.sort.unwrap_or_default(),
        direction: query.direction.unwrap_or_default(),
    };
    let page = PageRequest::new(query.page, query.per_page);

    let tickets = TicketService::new(&state.db)
        .list(filter, sort, page)
        .await?;

    Ok((StatusCode::OK, Json(PageDto::from(tickets))))
}

/// File a ticket
#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = TICKET_TAG,
    request_body = CreateTicketDto,
    responses(
        (status = 201, description = "Ticket created", body = TicketDto),
        (status = 400, description = "Invalid subject, description or inactive category", body = ErrorDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let ticket = TicketService::new(&state.db).create(&actor, payload).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Ticket counts by status, priority and category
///
/// Staff only.
#[utoipa::path(
    get,
    path = "/api/tickets/stats",
    tag = TICKET_TAG,
    responses(
        (status = 200, description = "Ticket statistics", body = TicketStatsDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ticket_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let stats = TicketService::new(&state.db).stats(&actor).await?;

    Ok((StatusCode::OK, Json(stats)))
}

/// Get a ticket
///
/// Every call counts as a view.
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = TICKET_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket", body = TicketDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let ticket = TicketService::new(&state.db).get(&actor, ticket_id).await?;

    Ok((StatusCode::OK, Json(ticket)))
}

/// Edit a ticket
///
/// The creator may edit while the ticket is open, staff at any time. Priority is staff only.
#[utoipa::path(
    patch,
    path = "/api/tickets/{id}",
    tag = TICKET_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = UpdateTicketDto,
    responses(
        (status = 200, description = "Ticket updated", body = TicketDto),
        (status = 400, description = "Invalid subject, description or inactive category", body = ErrorDto),
        (status = 403, description = "Not allowed to edit", body = ErrorDto),
        (status = 404, description = "Ticket or category not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
    Json(payload): Json<UpdateTicketDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let ticket = TicketService::new(&state.db)
        .update_details(&actor, ticket_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(ticket)))
}

/// Delete a ticket
///
/// Admins may delete any ticket, creators their own while it is open and nobody else has
/// commented.
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    tag = TICKET_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 403, description = "Not allowed to delete", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    TicketService::new(&state.db)
        .delete(&actor, ticket_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change the status of a ticket
#[utoipa::path(
    put,
    path = "/api/tickets/{id}/status",
    tag = TICKET_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = ChangeStatusDto,
    responses(
        (status = 200, description = "Status changed", body = TicketDto),
        (status = 403, description = "Not allowed to make this transition", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 409, description = "Invalid status transition", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_status(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
    Json(payload): Json<ChangeStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let ticket = TicketService::new(&state.db)
        .change_status(&actor, ticket_id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(ticket)))
}

/// Assign or unassign a ticket
///
/// Staff only. `null` unassigns.
#[utoipa::path(
    put,
    path = "/api/tickets/{id}/assignee",
    tag = TICKET_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = AssignTicketDto,
    responses(
        (status = 200, description = "Assignee updated", body = TicketDto),
        (status = 400, description = "User cannot be assigned tickets", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
    Json(payload): Json<AssignTicketDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let ticket = TicketService::new(&state.db)
        .assign(&actor, ticket_id, payload.assignee_id)
        .await?;

    Ok((StatusCode::OK, Json(ticket)))
}
