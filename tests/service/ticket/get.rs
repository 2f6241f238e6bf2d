//! Tests for TicketService::get.

use entity::sea_orm_active_enums::UserRole;
use helpdesk::server::{
    error::{ticket::TicketError, Error},
    service::ticket::TicketService,
};
use helpdesk_test_utils::prelude::*;

/// Expect every fetch to count as a view
#[tokio::test]
async fn increments_view_count() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let ticket = test.ticket().insert_ticket(user.id, category.id).await?;
    let ticket_service = TicketService::new(&test.db);

    ticket_service.get(&user, ticket.id).await.ok();
    let result = ticket_service.get(&user, ticket.id).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap().view_count, 2);

    Ok(())
}

/// Expect NotFound for a ticket that does not exist
#[tokio::test]
async fn fails_for_unknown_ticket() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;

    let result = TicketService::new(&test.db).get(&user, 7).await;

    assert!(matches!(
        result,
        Err(Error::TicketError(TicketError::NotFound(7)))
    ));

    Ok(())
}
