use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel, session::user::SessionUserId},
    service::auth::AuthService,
};

/// Retrieves the signed in user from session and then from database
///
/// Suspended and deactivated users are rejected here so that no service is reached on their
/// behalf, even with a session created before the suspension.
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(UserModel)`: Signed in user allowed to use the helpdesk
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID exists in session but not found in database (session is cleared)
/// - `Err(Error::AuthError(AuthError::UserSuspended | AuthError::UserInactive))`: User may not act
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserModel, Error> {
    let user = get_signed_in_user(state, session).await?;

    if user.suspended {
        return Err(AuthError::UserSuspended(user.id).into());
    }
    if !user.is_active {
        return Err(AuthError::UserInactive(user.id).into());
    }

    Ok(user)
}

/// Like [`get_user_from_session`] but lets suspended and deactivated users through, so they
/// can still see their own account.
pub async fn get_signed_in_user(state: &AppState, session: &Session) -> Result<UserModel, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(AuthError::UserNotInSession.into());
    };

    let Some(user) = AuthService::new(&state.db, &state.token_verifier)
        .get_current_user(user_id)
        .await?
    else {
        session.clear().await;

        tracing::warn!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(AuthError::UserNotInDatabase(user_id).into());
    };

    Ok(user)
}
