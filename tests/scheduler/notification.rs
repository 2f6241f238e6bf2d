//! Tests for the read notification cleanup job.

use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{NotificationType, UserRole};
use helpdesk::server::{
    data::notification::NotificationRepository,
    scheduler::notification::purge_read_before,
};
use helpdesk_test_utils::prelude::*;

/// Expect read notifications older than the cutoff to be deleted and unread ones kept
#[tokio::test]
async fn purges_only_read_notifications() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let read = test
        .ticket()
        .insert_notification(user.id, None, NotificationType::CommentAdded)
        .await?;
    let unread = test
        .ticket()
        .insert_notification(user.id, None, NotificationType::CommentAdded)
        .await?;
    let notification_repo = NotificationRepository::new(&test.db);
    notification_repo.mark_read(read.id).await?;

    let cutoff = (Utc::now() + Duration::minutes(1)).naive_utc();
    let result = purge_read_before(&test.db, cutoff).await;

    assert!(matches!(result, Ok(1)), "Result: {:?}", result);
    assert!(notification_repo.get_by_id(read.id).await?.is_none());
    assert!(notification_repo.get_by_id(unread.id).await?.is_some());

    Ok(())
}

/// Expect read notifications newer than the cutoff to be kept
#[tokio::test]
async fn keeps_recent_read_notifications() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let read = test
        .ticket()
        .insert_notification(user.id, None, NotificationType::CommentAdded)
        .await?;
    let notification_repo = NotificationRepository::new(&test.db);
    notification_repo.mark_read(read.id).await?;

    let cutoff = (Utc::now() - Duration::days(30)).naive_utc();
    let result = purge_read_before(&test.db, cutoff).await;

    assert!(matches!(result, Ok(0)), "Result: {:?}", result);

    Ok(())
}
