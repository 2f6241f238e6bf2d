//! Tests for TicketService::update_details.

use entity::sea_orm_active_enums::{TicketPriority, TicketStatus, UserRole};
use helpdesk::{
    model::ticket::UpdateTicketDto,
    server::{
        error::{auth::AuthError, category::CategoryError, Error},
        service::ticket::TicketService,
    },
};
use helpdesk_test_utils::prelude::*;

/// Expect the creator to edit the subject of an OPEN ticket
#[tokio::test]
async fn creator_edits_open_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;

    let payload = UpdateTicketDto {
        subject: Some("Printer still on fire".to_string()),
        ..Default::default()
    };
    let result = TicketService::new(&test.db)
        .update_details(&user, ticket.id, payload)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let updated = result.unwrap();
    assert_eq!(updated.subject, "Printer still on fire");
    assert_eq!(updated.description, ticket.description);

    Ok(())
}

/// Expect Forbidden when the creator edits a ticket already being worked on
#[tokio::test]
async fn creator_cannot_edit_in_progress_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test
        .ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::InProgress)
        .await?;

    let payload = UpdateTicketDto {
        description: Some("More details".to_string()),
        ..Default::default()
    };
    let result = TicketService::new(&test.db)
        .update_details(&user, ticket.id, payload)
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    Ok(())
}

/// Expect Forbidden when the creator raises the priority
#[tokio::test]
async fn priority_is_staff_only() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;
    let ticket_service = TicketService::new(&test.db);

    let payload = UpdateTicketDto {
        priority: Some(TicketPriority::Urgent),
        ..Default::default()
    };

    let by_creator = ticket_service
        .update_details(&user, ticket.id, payload.clone())
        .await;
    assert!(matches!(
        by_creator,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    let by_agent = ticket_service
        .update_details(&agent, ticket.id, payload)
        .await;
    assert!(by_agent.is_ok(), "Error: {:?}", by_agent);
    assert_eq!(by_agent.unwrap().priority, TicketPriority::Urgent);

    Ok(())
}

/// Expect Inactive when moving a ticket into a deactivated category
#[tokio::test]
async fn rejects_inactive_category() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let legacy = test.category().insert_inactive_category("Legacy").await?;
    let ticket = test.ticket().insert_ticket(agent.id, category.id).await?;

    let payload = UpdateTicketDto {
        category_id: Some(legacy.id),
        ..Default::default()
    };
    let result = TicketService::new(&test.db)
        .update_details(&agent, ticket.id, payload)
        .await;

    assert!(matches!(
        result,
        Err(Error::CategoryError(CategoryError::Inactive(_)))
    ));

    Ok(())
}
