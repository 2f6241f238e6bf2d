//! Database model type aliases.
//!
//! Short names for the SeaORM models of the `entity` crate, used in service and controller
//! signatures.

/// A helpdesk account mirrored from the identity provider.
pub type UserModel = entity::user::Model;

pub type CategoryModel = entity::category::Model;

/// A support ticket. Vote tallies are denormalized onto the row.
pub type TicketModel = entity::ticket::Model;

pub type CommentModel = entity::comment::Model;

pub type AttachmentModel = entity::attachment::Model;

/// One user's vote on one ticket; unique per `(ticket_id, user_id)`.
pub type VoteModel = entity::vote::Model;

pub type NotificationModel = entity::notification::Model;
