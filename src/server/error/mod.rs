//! Error types for the helpdesk server.
//!
//! Each domain (authentication, configuration, users, categories, tickets) has its own
//! `thiserror` enum mapping to HTTP responses. They are aggregated into [`Error`] together with
//! the errors of the libraries the server is built on.

pub mod auth;
pub mod category;
pub mod config;
pub mod retry;
pub mod ticket;
pub mod user;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, category::CategoryError, config::ConfigError, ticket::TicketError,
        user::UserError,
    },
};

/// Main error type for the helpdesk server.
///
/// Uses `thiserror`'s `#[from]` so the `?` operator converts domain and library errors. The
/// `IntoResponse` implementation maps domain errors to their status codes, anything else
/// becomes a logged 500.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// User administration error.
    #[error(transparent)]
    UserError(#[from] UserError),
    /// Category management error.
    #[error(transparent)]
    CategoryError(#[from] CategoryError),
    /// Ticket, comment, attachment, vote or notification error.
    #[error(transparent)]
    TicketError(#[from] TicketError),
    /// Failed to parse a value from a string or other format.
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in the helpdesk's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Session token failed verification or the verification key is malformed.
    #[error(transparent)]
    JwtError(#[from] jsonwebtoken::errors::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// Failed to bind the HTTP listener or serve requests.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures
/// - 401 Unauthorized - No signed in user or an invalid session token
/// - 403 Forbidden - Suspended/inactive accounts and insufficient roles
/// - 404 Not Found - Missing resources
/// - 409 Conflict - Duplicate names, invalid status transitions, resources in use
/// - 500 Internal Server Error - Everything else (logged)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::UserError(err) => err.into_response(),
            Self::CategoryError(err) => err.into_response(),
            Self::TicketError(err) => err.into_response(),
            Self::JwtError(err) if is_rejected_token(&err) => {
                tracing::debug!("Rejected session token: {}", err);

                error_response(StatusCode::UNAUTHORIZED, "Invalid session token")
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Whether a token error was caused by the token itself rather than our key configuration.
fn is_rejected_token(err: &jsonwebtoken::errors::Error) -> bool {
    use jsonwebtoken::errors::ErrorKind;

    !matches!(
        err.kind(),
        ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat | ErrorKind::MissingAlgorithm
    )
}

/// JSON error body with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client to avoid leaking
/// implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
