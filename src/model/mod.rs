//! Data transfer objects shared by the HTTP API.

pub mod api;
pub mod attachment;
pub mod category;
pub mod comment;
pub mod notification;
pub mod ticket;
pub mod user;
