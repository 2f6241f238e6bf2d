//! Service layer for business logic.
//!
//! Services enforce roles and business rules on top of the repositories in
//! [`data`](crate::server::data). Each operation takes the signed in user as `actor`; suspended
//! and inactive users are turned away by the controllers before a service is reached.

pub mod attachment;
pub mod auth;
pub mod category;
pub mod comment;
pub mod notification;
pub mod retry;
pub mod ticket;
pub mod user;
pub mod vote;
