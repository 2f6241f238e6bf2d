//! SeaORM entities for the helpdesk schema.

pub mod prelude;

pub mod attachment;
pub mod category;
pub mod comment;
pub mod notification;
pub mod sea_orm_active_enums;
pub mod ticket;
pub mod user;
pub mod vote;
