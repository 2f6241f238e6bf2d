pub use super::attachment::Entity as Attachment;
pub use super::category::Entity as Category;
pub use super::comment::Entity as Comment;
pub use super::notification::Entity as Notification;
pub use super::ticket::Entity as Ticket;
pub use super::user::Entity as User;
pub use super::vote::Entity as Vote;
