//! Data access layer repositories.
//!
//! One repository per entity, each generic over [`sea_orm::ConnectionTrait`] so the same
//! queries run on a pooled connection or inside a transaction.

pub mod attachment;
pub mod category;
pub mod comment;
pub mod notification;
pub mod ticket;
pub mod user;
pub mod vote;

use sea_orm::{DbErr, SqlErr};

/// Whether `err` was raised by a unique index, e.g. when a concurrent insert won a race.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
