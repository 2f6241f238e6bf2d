//! Tests for TicketService::assign.

use entity::sea_orm_active_enums::{TicketStatus, UserRole};
use helpdesk::server::{
    data::notification::NotificationRepository,
    error::{auth::AuthError, ticket::TicketError, Error},
    service::ticket::TicketService,
};
use helpdesk_test_utils::prelude::*;

/// Expect assigning an OPEN ticket to move it to IN_PROGRESS and notify the assignee
#[tokio::test]
async fn assigns_and_starts_open_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;

    let result = TicketService::new(&test.db)
        .assign(&admin, ticket.id, Some(agent.id))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let ticket = result.unwrap();
    assert_eq!(ticket.status, TicketStatus::InProgress);
    assert_eq!(ticket.assignee.map(|assignee| assignee.id), Some(agent.id));

    let notification_repo = NotificationRepository::new(&test.db);
    assert_eq!(notification_repo.count_unread(agent.id).await?, 1);

    Ok(())
}

/// Expect assigning a ticket that is no longer OPEN to keep its current status
#[tokio::test]
async fn assigning_closed_ticket_keeps_it_closed() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test
        .ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::Closed)
        .await?;

    let result = TicketService::new(&test.db)
        .assign(&admin, ticket.id, Some(agent.id))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let ticket = result.unwrap();
    assert_eq!(ticket.status, TicketStatus::Closed);
    assert_eq!(ticket.assignee.map(|assignee| assignee.id), Some(agent.id));

    Ok(())
}

/// Expect self-assignment to skip the notification
#[tokio::test]
async fn self_assignment_is_not_notified() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;

    let result = TicketService::new(&test.db)
        .assign(&agent, ticket.id, Some(agent.id))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let notification_repo = NotificationRepository::new(&test.db);
    assert_eq!(notification_repo.count_unread(agent.id).await?, 0);

    Ok(())
}

/// Expect unassigning to keep the status
#[tokio::test]
async fn unassigns_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test
        .ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::InProgress)
        .await?;
    test.ticket().assign_ticket(ticket.id, agent.id).await?;

    let result = TicketService::new(&test.db)
        .assign(&agent, ticket.id, None)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let ticket = result.unwrap();
    assert!(ticket.assignee.is_none());
    assert_eq!(ticket.status, TicketStatus::InProgress);

    Ok(())
}

/// Expect InvalidAssignee for end users and suspended staff
#[tokio::test]
async fn rejects_unassignable_users() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let suspended = test
        .user()
        .insert_suspended_user(UserRole::SupportAgent)
        .await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;
    let ticket_service = TicketService::new(&test.db);

    for assignee_id in [user.id, suspended.id, 999] {
        let result = ticket_service
            .assign(&agent, ticket.id, Some(assignee_id))
            .await;

        assert!(
            matches!(
                result,
                Err(Error::TicketError(TicketError::InvalidAssignee(id))) if id == assignee_id
            ),
            "Assignee {} was accepted",
            assignee_id
        );
    }

    Ok(())
}

/// Expect Forbidden when an end user assigns a ticket
#[tokio::test]
async fn requires_staff() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;

    let result = TicketService::new(&test.db)
        .assign(&user, ticket.id, Some(agent.id))
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    Ok(())
}
