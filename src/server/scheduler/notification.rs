//! Retention of read notifications.

use chrono::{NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository, error::Error, util::time::cutoff_days_ago,
};

/// Deletes read notifications older than `retention_days` days. Unread ones are kept.
pub async fn purge_read_notifications(
    db: DatabaseConnection,
    retention_days: i64,
) -> Result<u64, Error> {
    let cutoff = cutoff_days_ago(Utc::now(), retention_days)?;

    purge_read_before(&db, cutoff).await
}

pub async fn purge_read_before(
    db: &DatabaseConnection,
    cutoff: NaiveDateTime,
) -> Result<u64, Error> {
    let notification_repo = NotificationRepository::new(db);

    Ok(notification_repo.delete_read_before(cutoff).await?)
}
