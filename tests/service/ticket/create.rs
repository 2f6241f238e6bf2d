//! Tests for TicketService::create.

use entity::sea_orm_active_enums::{TicketPriority, TicketStatus, UserRole};
use helpdesk::{
    model::ticket::CreateTicketDto,
    server::{
        data::notification::NotificationRepository,
        error::{category::CategoryError, ticket::TicketError, Error},
        service::ticket::{TicketService, MAX_SUBJECT_LENGTH},
    },
};
use helpdesk_test_utils::prelude::*;

fn new_ticket(category_id: i32) -> CreateTicketDto {
    CreateTicketDto {
        subject: "  Printer on fire  ".to_string(),
        description: "It started smoking after the last job".to_string(),
        category_id,
        priority: None,
    }
}

/// Expect an OPEN, MEDIUM priority ticket with a trimmed subject
#[tokio::test]
async fn creates_open_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;

    let result = TicketService::new(&test.db)
        .create(&user, new_ticket(category.id))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let ticket = result.unwrap();
    assert_eq!(ticket.subject, "Printer on fire");
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.priority, TicketPriority::Medium);
    assert_eq!(ticket.creator.id, user.id);
    assert_eq!(ticket.category.id, category.id);
    assert!(ticket.assignee.is_none());
    assert_eq!(ticket.score, 0);

    Ok(())
}

/// Expect every active staff member except the creator to be notified
#[tokio::test]
async fn notifies_staff() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;

    let result = TicketService::new(&test.db)
        .create(&agent, new_ticket(category.id))
        .await;
    assert!(result.is_ok(), "Error: {:?}", result);

    let notification_repo = NotificationRepository::new(&test.db);
    assert_eq!(notification_repo.count_unread(admin.id).await?, 1);
    assert_eq!(notification_repo.count_unread(agent.id).await?, 0);
    assert_eq!(notification_repo.count_unread(user.id).await?, 0);

    Ok(())
}

/// Expect InvalidSubject for a subject that is blank or too long
#[tokio::test]
async fn rejects_invalid_subject() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket_service = TicketService::new(&test.db);

    let mut blank = new_ticket(category.id);
    blank.subject = "   ".to_string();
    let result = ticket_service.create(&user, blank).await;
    assert!(matches!(
        result,
        Err(Error::TicketError(TicketError::InvalidSubject { .. }))
    ));

    let mut too_long = new_ticket(category.id);
    too_long.subject = "a".repeat(MAX_SUBJECT_LENGTH + 1);
    let result = ticket_service.create(&user, too_long).await;
    assert!(matches!(
        result,
        Err(Error::TicketError(TicketError::InvalidSubject { .. }))
    ));

    Ok(())
}

/// Expect Inactive when filing into a deactivated category
#[tokio::test]
async fn rejects_inactive_category() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_inactive_category("Legacy").await?;

    let result = TicketService::new(&test.db)
        .create(&user, new_ticket(category.id))
        .await;

    assert!(matches!(
        result,
        Err(Error::CategoryError(CategoryError::Inactive(_)))
    ));

    Ok(())
}

/// Expect NotFound for a category that does not exist
#[tokio::test]
async fn rejects_unknown_category() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;

    let result = TicketService::new(&test.db)
        .create(&user, new_ticket(42))
        .await;

    assert!(matches!(
        result,
        Err(Error::CategoryError(CategoryError::NotFound(42)))
    ));

    Ok(())
}
