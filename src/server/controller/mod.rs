//! HTTP controller endpoints for the helpdesk web API.
//!
//! Axum handlers that resolve the signed in user from the session, call into the service
//! layer and serialize the result. Every handler is documented with utoipa for the OpenAPI
//! document served under `/api/docs`.

pub mod attachment;
pub mod auth;
pub mod category;
pub mod comment;
pub mod notification;
pub mod ticket;
pub mod user;
pub mod util;
pub mod vote;
