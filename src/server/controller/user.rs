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
        user::{
            SetActiveDto, SetSuspendedDto, UpdateRoleDto, UserDto, UserListQuery, UserSummaryDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::{
            app::AppState,
            query::{PageRequest, UserFilter},
        },
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// List users
///
/// Admin only.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of users", body = PageDto<UserDto>),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let filter = UserFilter {
        role: query.role,
        is_active: query.is_active,
        suspended: query.suspended,
        search: query.search,
    };
    let page = PageRequest::new(query.page, query.per_page);

    let users = UserService::new(&state.db)
        .list_users(&actor, filter, page)
        .await?;

    Ok((StatusCode::OK, Json(PageDto::from(users))))
}

/// List users tickets can be assigned to
///
/// Staff only.
#[utoipa::path(
    get,
    path = "/api/users/staff",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Assignable staff", body = Vec<UserSummaryDto>),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not staff", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_staff(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let staff = UserService::new(&state.db).list_staff(&actor).await?;

    Ok((StatusCode::OK, Json(staff)))
}

/// Change a user's role
///
/// Admin only, admins cannot change their own role.
#[utoipa::path(
    put,
    path = "/api/users/{id}/role",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role changed", body = UserDto),
        (status = 400, description = "Admin targeted themselves", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let user = UserService::new(&state.db)
        .update_role(&actor, user_id, payload.role)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Suspend or unsuspend a user
///
/// Admin only, not on oneself.
#[utoipa::path(
    put,
    path = "/api/users/{id}/suspension",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetSuspendedDto,
    responses(
        (status = 200, description = "Suspension updated", body = UserDto),
        (status = 400, description = "Admin targeted themselves", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_suspended(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetSuspendedDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let user = UserService::new(&state.db)
        .set_suspended(&actor, user_id, payload.suspended)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Activate or deactivate a user
///
/// Admin only, not on oneself.
#[utoipa::path(
    put,
    path = "/api/users/{id}/active",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Active state updated", body = UserDto),
        (status = 400, description = "Admin targeted themselves", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_active(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetActiveDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let user = UserService::new(&state.db)
        .set_active(&actor, user_id, payload.is_active)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
