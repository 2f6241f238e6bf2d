//! Tests for TicketService::change_status.

use entity::sea_orm_active_enums::{TicketStatus, UserRole};
use helpdesk::server::{
    data::notification::NotificationRepository,
    error::{auth::AuthError, ticket::TicketError, Error},
    service::ticket::TicketService,
};
use helpdesk_test_utils::prelude::*;

/// Expect resolving to set resolved_at and notify the creator
#[tokio::test]
async fn staff_resolves_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;

    let result = TicketService::new(&test.db)
        .change_status(&agent, ticket.id, TicketStatus::Resolved)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let ticket = result.unwrap();
    assert_eq!(ticket.status, TicketStatus::Resolved);
    assert!(ticket.resolved_at.is_some());
    assert!(ticket.closed_at.is_none());

    let notification_repo = NotificationRepository::new(&test.db);
    assert_eq!(notification_repo.count_unread(user.id).await?, 1);

    Ok(())
}

/// Expect reopening to clear resolved_at and closed_at
#[tokio::test]
async fn reopening_clears_timestamps() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test
        .ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::Closed)
        .await?;

    let result = TicketService::new(&test.db)
        .change_status(&user, ticket.id, TicketStatus::Open)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let ticket = result.unwrap();
    assert_eq!(ticket.status, TicketStatus::Open);
    assert!(ticket.resolved_at.is_none());
    assert!(ticket.closed_at.is_none());

    // Creators are not notified of their own changes
    let notification_repo = NotificationRepository::new(&test.db);
    assert_eq!(notification_repo.count_unread(user.id).await?, 0);

    Ok(())
}

/// Expect InvalidTransition when moving a CLOSED ticket to RESOLVED
#[tokio::test]
async fn rejects_invalid_transition() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test
        .ticket()
        .insert_ticket_with_status(agent.id, category.id, TicketStatus::Closed)
        .await?;

    let result = TicketService::new(&test.db)
        .change_status(&agent, ticket.id, TicketStatus::Resolved)
        .await;

    assert!(matches!(
        result,
        Err(Error::TicketError(TicketError::InvalidTransition {
            from: TicketStatus::Closed,
            to: TicketStatus::Resolved
        }))
    ));

    Ok(())
}

/// Expect a transition checked against the latest status to be rejected without side effects
#[tokio::test]
async fn rejected_transition_leaves_ticket_untouched() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;
    let ticket_service = TicketService::new(&test.db);

    ticket_service
        .change_status(&agent, ticket.id, TicketStatus::Closed)
        .await
        .unwrap();
    let result = ticket_service
        .change_status(&agent, ticket.id, TicketStatus::InProgress)
        .await;

    assert!(matches!(
        result,
        Err(Error::TicketError(TicketError::InvalidTransition {
            from: TicketStatus::Closed,
            to: TicketStatus::InProgress
        }))
    ));
    let stored = ticket_service.get(&agent, ticket.id).await.unwrap();
    assert_eq!(stored.status, TicketStatus::Closed);
    let notification_repo = NotificationRepository::new(&test.db);
    assert_eq!(notification_repo.count_unread(user.id).await?, 1);

    Ok(())
}

/// Expect Forbidden when the creator tries to resolve their own ticket
#[tokio::test]
async fn creator_cannot_resolve() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;

    let result = TicketService::new(&test.db)
        .change_status(&user, ticket.id, TicketStatus::Resolved)
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    Ok(())
}

/// Expect Forbidden when an end user closes someone else's ticket
#[tokio::test]
async fn other_end_user_cannot_close() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let creator = test.user().insert_user(UserRole::EndUser).await?;
    let other = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(creator.id, category.id).await?;

    let result = TicketService::new(&test.db)
        .change_status(&other, ticket.id, TicketStatus::Closed)
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    Ok(())
}

/// Expect NotFound for a ticket that does not exist
#[tokio::test]
async fn fails_for_unknown_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;

    let result = TicketService::new(&test.db)
        .change_status(&agent, 99, TicketStatus::Closed)
        .await;

    assert!(matches!(
        result,
        Err(Error::TicketError(TicketError::NotFound(99)))
    ));

    Ok(())
}
