//! Tests for TicketService::stats.

use entity::sea_orm_active_enums::{TicketStatus, UserRole};
use helpdesk::server::{
    error::{auth::AuthError, Error},
    service::ticket::TicketService,
};
use helpdesk_test_utils::prelude::*;

/// Expect counts per status, including statuses without tickets, and per category
#[tokio::test]
async fn counts_tickets() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let hardware = test.category().insert_category("Hardware").await?;
    let billing = test.category().insert_category("Billing").await?;
    test.ticket().insert_ticket(user.id, hardware.id).await?;
    test.ticket().insert_ticket(user.id, hardware.id).await?;
    test.ticket()
        .insert_ticket_with_status(user.id, billing.id, TicketStatus::Resolved)
        .await?;

    let result = TicketService::new(&test.db).stats(&agent).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let stats = result.unwrap();
    assert_eq!(stats.total, 3);

    let count_of = |status: TicketStatus| {
        stats
            .by_status
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
    };
    assert_eq!(count_of(TicketStatus::Open), Some(2));
    assert_eq!(count_of(TicketStatus::Resolved), Some(1));
    assert_eq!(count_of(TicketStatus::Closed), Some(0));

    let hardware_count = stats
        .by_category
        .iter()
        .find(|entry| entry.category.id == hardware.id)
        .map(|entry| entry.count);
    assert_eq!(hardware_count, Some(2));

    Ok(())
}

/// Expect Forbidden for end users
#[tokio::test]
async fn requires_staff() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;

    let result = TicketService::new(&test.db).stats(&user).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    Ok(())
}
