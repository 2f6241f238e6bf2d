use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User ID {0:?} not found")]
    NotFound(i32),
    #[error("User ID {0:?} attempted to change their own role, suspension or active state")]
    CannotModifySelf(i32),
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "User not found"),
            Self::CannotModifySelf(_) => error_response(
                StatusCode::BAD_REQUEST,
                "You cannot change your own role, suspension or active state",
            ),
        }
    }
}
