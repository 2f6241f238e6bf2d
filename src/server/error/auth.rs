use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Session token for Clerk user {0:?} has no email claim, required on first sign-in")]
    MissingEmailClaim(String),
    #[error("User ID {0:?} is suspended")]
    UserSuspended(i32),
    #[error("User ID {0:?} is deactivated")]
    UserInactive(i32),
    #[error("User ID {user_id:?} is not allowed to {action}")]
    Forbidden { user_id: i32, action: String },
}

impl AuthError {
    /// Shorthand for a permission failure on `action`.
    pub fn forbidden(user_id: i32, action: impl Into<String>) -> Self {
        Self::Forbidden {
            user_id,
            action: action.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Not signed in")
            }
            Self::MissingEmailClaim(_) => error_response(
                StatusCode::BAD_REQUEST,
                "An email address is required to create your account",
            ),
            Self::UserSuspended(_) => {
                error_response(StatusCode::FORBIDDEN, "Your account has been suspended")
            }
            Self::UserInactive(_) => {
                error_response(StatusCode::FORBIDDEN, "Your account has been deactivated")
            }
            Self::Forbidden { action, .. } => error_response(
                StatusCode::FORBIDDEN,
                format!("You are not allowed to {}", action),
            ),
        }
    }
}
