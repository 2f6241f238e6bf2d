use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        ticket::{CastVoteDto, VoteSummaryDto},
    },
    server::{
        controller::{ticket::TICKET_TAG, util::get_user::get_user_from_session},
        error::Error,
        model::app::AppState,
        service::vote::VoteService,
    },
};

/// Up or down vote a ticket
///
/// Voting again in the same direction changes nothing, the opposite direction flips the vote.
#[utoipa::path(
    put,
    path = "/api/tickets/{id}/vote",
    tag = TICKET_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = CastVoteDto,
    responses(
        (status = 200, description = "Vote recorded", body = VoteSummaryDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 409, description = "Ticket is closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cast_vote(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
    Json(payload): Json<CastVoteDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let summary = VoteService::new(&state.db)
        .cast(&actor, ticket_id, payload.is_upvote)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Retract the signed in user's vote
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}/vote",
    tag = TICKET_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Vote removed", body = VoteSummaryDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 409, description = "Ticket is closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn retract_vote(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let summary = VoteService::new(&state.db)
        .retract(&actor, ticket_id)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}
