//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main helpdesk crate to keep tests consistent.

pub type UserModel = entity::user::Model;

pub type CategoryModel = entity::category::Model;

pub type TicketModel = entity::ticket::Model;

pub type CommentModel = entity::comment::Model;

pub type AttachmentModel = entity::attachment::Model;

pub type VoteModel = entity::vote::Model;

pub type NotificationModel = entity::notification::Model;
