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
        attachment::{AttachmentDto, CreateAttachmentDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::attachment::AttachmentService,
    },
};

pub static ATTACHMENT_TAG: &str = "attachment";

/// List attachments of a ticket and its visible comments
#[utoipa::path(
    get,
    path = "/api/tickets/{id}/attachments",
    tag = ATTACHMENT_TAG,
    params(("id" = i32, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Attachments", body = Vec<AttachmentDto>),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_attachments(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let attachments = AttachmentService::new(&state.db, state.max_attachment_size)
        .list_for_ticket(&actor, ticket_id)
        .await?;

    Ok((StatusCode::OK, Json(attachments)))
}

/// Record an uploaded file on a ticket or comment
#[utoipa::path(
    post,
    path = "/api/attachments",
    tag = ATTACHMENT_TAG,
    request_body = CreateAttachmentDto,
    responses(
        (status = 201, description = "Attachment recorded", body = AttachmentDto),
        (status = 400, description = "Invalid metadata, size, URL or parents", body = ErrorDto),
        (status = 404, description = "Ticket or comment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_attachment(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAttachmentDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let attachment = AttachmentService::new(&state.db, state.max_attachment_size)
        .add(&actor, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(attachment)))
}

/// Delete an attachment
///
/// Uploaders and admins.
#[utoipa::path(
    delete,
    path = "/api/attachments/{id}",
    tag = ATTACHMENT_TAG,
    params(("id" = i32, Path, description = "Attachment ID")),
    responses(
        (status = 204, description = "Attachment deleted"),
        (status = 403, description = "Not the uploader or an admin", body = ErrorDto),
        (status = 404, description = "Attachment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_attachment(
    State(state): State<AppState>,
    session: Session,
    Path(attachment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    AttachmentService::new(&state.db, state.max_attachment_size)
        .delete(&actor, attachment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
