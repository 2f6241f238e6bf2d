use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{SignInDto, UpdatePreferencesDto, UserDto},
    },
    server::{
        controller::util::get_user::{get_signed_in_user, get_user_from_session},
        error::Error,
        model::{app::AppState, session::user::SessionUserId},
        service::{auth::AuthService, user::UserService},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Sign in with a Clerk session token
///
/// Verifies the token, creates or refreshes the matching helpdesk user and stores the user in
/// a new server session.
#[utoipa::path(
    post,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    request_body = SignInDto,
    responses(
        (status = 200, description = "Signed in", body = UserDto),
        (status = 400, description = "Token has no email claim on first sign-in", body = ErrorDto),
        (status = 401, description = "Invalid session token", body = ErrorDto),
        (status = 403, description = "User is suspended or deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SignInDto>,
) -> Result<impl IntoResponse, Error> {
    let auth_service = AuthService::new(&state.db, &state.token_verifier);

    let user = auth_service.sign_in(&payload.token).await?;

    // New session ID on every sign-in to prevent session fixation
    session.cycle_id().await?;
    SessionUserId::insert(&session, user.id).await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Sign out by clearing the session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Signed out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    let maybe_user_id = SessionUserId::get(&session).await?;

    // Only clear session if there is actually a user in session
    if maybe_user_id.is_some() {
        session.clear().await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Get the signed in user
///
/// Suspended and deactivated users can still read their own account.
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Signed in user", body = UserDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_signed_in_user(&state, &session).await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Update notification preferences of the signed in user
#[utoipa::path(
    patch,
    path = "/api/auth/user/preferences",
    tag = AUTH_TAG,
    request_body = UpdatePreferencesDto,
    responses(
        (status = 200, description = "Preferences updated", body = UserDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "User is suspended or deactivated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_preferences(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdatePreferencesDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = get_user_from_session(&state, &session).await?;

    let user = UserService::new(&state.db)
        .update_preferences(&actor, payload.email_notifications)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
