//! Test fixture modules for database record creation.
//!
//! Fixtures are inserted during test execution through helper accessors on the context:
//!
//! - `user` - Users of every role, plus in-memory model factories
//! - `category` - Ticket categories
//! - `ticket` - Tickets and the records hanging off them (comments, votes, attachments,
//!   notifications)

pub mod category;
pub mod ticket;
pub mod user;
