use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient infrastructure errors)
    Retry,
    /// Failed permanently (bad request, bug, configuration)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                // Connection errors are transient
                DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query errors, constraint violations, type conversion and missing records won't
                // resolve by running the same statement again
                _ => ErrorRetryStrategy::Fail,
            },

            // Session store errors are usually Redis connection issues
            Self::SessionError(_) | Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::UserError(_)
            | Self::CategoryError(_)
            | Self::TicketError(_)
            | Self::ParseError(_)
            | Self::InternalError(_)
            | Self::JwtError(_)
            | Self::SchedulerError(_)
            | Self::IoError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
