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
        comment::{CommentDto, CreateCommentDto, UpdateCommentDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::comment::CommentService,
    },
};

pub static COMMENT_TAG: &str = "comment";

/// List comments of a ticket
///
/// Internal comments are only returned to staff.
#[utoipa::path(
    get,
    path = "/api/tickets/{id}/comments",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Comments, oldest first", body = Vec<CommentDto>),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_comments(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let comments = CommentService::new(&state.db)
        .list(&actor, ticket_id)
        .await?;

    Ok((StatusCode::OK, Json(comments)))
}

/// Comment on a ticket
///
/// Only staff may post internal comments.
#[utoipa::path(
    post,
    path = "/api/tickets/{id}/comments",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = CommentDto),
        (status = 400, description = "Invalid content", body = ErrorDto),
        (status = 403, description = "Internal comment by end user", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 409, description = "Ticket is closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_comment(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
    Json(payload): Json<CreateCommentDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let comment = CommentService::new(&state.db)
        .add(&actor, ticket_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Edit a comment
///
/// Authors only.
#[utoipa::path(
    patch,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Comment ID")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Invalid content", body = ErrorDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn edit_comment(
    State(state): State<AppState>,
    session: Session,
    Path(comment_id): Path<i32>,
    Json(payload): Json<UpdateCommentDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let comment = CommentService::new(&state.db)
        .edit(&actor, comment_id, payload.content)
        .await?;

    Ok((StatusCode::OK, Json(comment)))
}

/// Delete a comment
///
/// Authors and admins.
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    params(("id" = i32, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the author or an admin", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    session: Session,
    Path(comment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    CommentService::new(&state.db)
        .delete(&actor, comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
