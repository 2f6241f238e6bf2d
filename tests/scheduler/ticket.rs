//! Tests for the resolved ticket auto-close job.

use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{NotificationType, TicketStatus, UserRole};
use helpdesk::server::{
    data::{notification::NotificationRepository, ticket::TicketRepository},
    model::query::PageRequest,
    scheduler::ticket::close_resolved_before,
};
use helpdesk_test_utils::prelude::*;

/// Expect tickets resolved before the cutoff to be closed and their creators notified
#[tokio::test]
async fn closes_stale_resolved_tickets() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let resolved = test
        .ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::Resolved)
        .await?;
    let open = test.ticket().insert_ticket(user.id, category.id).await?;

    let cutoff = (Utc::now() + Duration::minutes(1)).naive_utc();
    let result = close_resolved_before(&test.db, cutoff).await;

    assert!(matches!(result, Ok(1)), "Result: {:?}", result);

    let ticket_repo = TicketRepository::new(&test.db);
    let closed = ticket_repo.get_by_id(resolved.id).await?.unwrap();
    assert_eq!(closed.status, TicketStatus::Closed);
    assert!(closed.closed_at.is_some());
    assert!(closed.resolved_at.is_some());
    let untouched = ticket_repo.get_by_id(open.id).await?.unwrap();
    assert_eq!(untouched.status, TicketStatus::Open);

    let notifications = NotificationRepository::new(&test.db)
        .find_by_user(user.id, true, PageRequest::default())
        .await?;
    assert_eq!(notifications.total_items, 1);
    assert_eq!(
        notifications.items[0].r#type,
        NotificationType::TicketStatusChanged
    );
    assert_eq!(notifications.items[0].ticket_id, Some(resolved.id));

    Ok(())
}

/// Expect recently resolved tickets to be left alone
#[tokio::test]
async fn keeps_recently_resolved_tickets() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let resolved = test
        .ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::Resolved)
        .await?;

    let cutoff = (Utc::now() - Duration::days(7)).naive_utc();
    let result = close_resolved_before(&test.db, cutoff).await;

    assert!(matches!(result, Ok(0)), "Result: {:?}", result);
    let ticket = TicketRepository::new(&test.db)
        .get_by_id(resolved.id)
        .await?
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Resolved);

    Ok(())
}

/// Expect DbErr when the ticket table is missing
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = close_resolved_before(&test.db, Utc::now().naive_utc()).await;

    assert!(result.is_err());

    Ok(())
}
