//! Tests for TicketService::list.

use entity::sea_orm_active_enums::{TicketStatus, UserRole};
use helpdesk::server::{
    model::query::{PageRequest, SortDirection, TicketFilter, TicketSort},
    service::ticket::TicketService,
};
use helpdesk_test_utils::prelude::*;

/// Expect filters to combine and unassigned to exclude assigned tickets
#[tokio::test]
async fn filters_by_status_and_assignment() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category = test.category().insert_category("Hardware").await?;
    let unassigned = test.ticket().insert_ticket(user.id, category.id).await?;
    let assigned = test.ticket().insert_ticket(user.id, category.id).await?;
    test.ticket().assign_ticket(assigned.id, agent.id).await?;
    test.ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::Closed)
        .await?;

    let filter = TicketFilter {
        status: Some(TicketStatus::Open),
        unassigned: true,
        ..Default::default()
    };
    let result = TicketService::new(&test.db)
        .list(filter, TicketSort::default(), PageRequest::default())
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let page = result.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, unassigned.id);

    Ok(())
}

/// Expect pages to split the result set and report totals
#[tokio::test]
async fn paginates_oldest_first() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(test.ticket().insert_ticket(user.id, category.id).await?.id);
    }

    let sort = TicketSort {
        direction: SortDirection::Asc,
        ..Default::default()
    };
    let result = TicketService::new(&test.db)
        .list(TicketFilter::default(), sort, PageRequest::new(Some(2), Some(2)))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let page = result.unwrap();
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);
    let page_ids: Vec<i32> = page.items.iter().map(|ticket| ticket.id).collect();
    assert_eq!(page_ids, ids[2..4].to_vec());

    Ok(())
}

/// Expect search to match a subject substring
#[tokio::test]
async fn searches_subject() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let category = test.category().insert_category("Hardware").await?;
    let first = test.ticket().insert_ticket(user.id, category.id).await?;
    test.ticket().insert_ticket(user.id, category.id).await?;

    let filter = TicketFilter {
        search: Some(first.subject.clone()),
        ..Default::default()
    };
    let result = TicketService::new(&test.db)
        .list(filter, TicketSort::default(), PageRequest::default())
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let page = result.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, first.id);

    Ok(())
}
