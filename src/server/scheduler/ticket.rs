//! Auto-closing of resolved tickets.

use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{notification::NotificationRepository, ticket::TicketRepository},
    error::Error,
    model::db::TicketModel,
    service::notification,
    util::time::cutoff_days_ago,
};

/// Closes tickets that have been RESOLVED for longer than `after_days` days.
///
/// # Returns
/// - `Ok(u64)` - Number of tickets closed
/// - `Err(Error)` - Cutoff out of range or database failure
pub async fn close_resolved_tickets(db: DatabaseConnection, after_days: i64) -> Result<u64, Error> {
    let cutoff = cutoff_days_ago(Utc::now(), after_days)?;

    close_resolved_before(&db, cutoff).await
}

/// Closes tickets resolved before `cutoff` and lets their creators know.
///
/// The selected tickets stay locked until the transaction ends, and only tickets the update
/// actually closed are notified about.
pub async fn close_resolved_before(
    db: &DatabaseConnection,
    cutoff: NaiveDateTime,
) -> Result<u64, Error> {
    let txn = db.begin().await?;
    let ticket_repo = TicketRepository::new(&txn);

    let tickets = ticket_repo.find_resolved_before(cutoff).await?;
    if tickets.is_empty() {
        return Ok(0);
    }

    let ticket_ids: Vec<i32> = tickets.iter().map(|ticket| ticket.id).collect();
    let closed_ids = ticket_repo.close_many(&ticket_ids).await?;

    let notifications = tickets
        .into_iter()
        .filter(|ticket| closed_ids.contains(&ticket.id))
        .map(|ticket| {
            let closed_ticket = TicketModel {
                status: TicketStatus::Closed,
                ..ticket
            };
            notification::status_changed(&closed_ticket, closed_ticket.creator_id)
        })
        .collect();
    NotificationRepository::new(&txn)
        .create_many(notifications)
        .await?;

    txn.commit().await?;

    Ok(closed_ids.len() as u64)
}
