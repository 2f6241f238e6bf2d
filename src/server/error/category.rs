use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("Category ID {0:?} not found")]
    NotFound(i32),
    #[error("Category name {0:?} is already taken")]
    NameTaken(String),
    #[error("Category ID {0:?} is referenced by tickets")]
    InUse(i32),
    #[error("Category ID {0:?} is inactive")]
    Inactive(i32),
    #[error("Category name must be between 1 and {max} characters")]
    InvalidName { max: usize },
    #[error("Category color {0:?} is not a #RRGGBB hex color")]
    InvalidColor(String),
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Category not found"),
            Self::NameTaken(_) => error_response(StatusCode::CONFLICT, self.to_string()),
            Self::InUse(_) => error_response(
                StatusCode::CONFLICT,
                "Category is used by tickets, deactivate it instead",
            ),
            Self::Inactive(_) => {
                error_response(StatusCode::BAD_REQUEST, "Category is no longer accepting tickets")
            }
            Self::InvalidName { .. } | Self::InvalidColor(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
        }
    }
}
