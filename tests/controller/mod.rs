use axum::{http::StatusCode, response::IntoResponse};
use helpdesk::server::error::Error;

mod notification;
mod ticket;

/// Status code a handler result turns into
fn status_of<T: IntoResponse>(result: Result<T, Error>) -> StatusCode {
    match result {
        Ok(resp) => resp.into_response().status(),
        Err(err) => err.into_response().status(),
    }
}
