use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use entity::sea_orm_active_enums::{TicketStatus, UserRole};
use helpdesk::{
    model::ticket::{
        AssignTicketDto, CastVoteDto, ChangeStatusDto, CreateTicketDto, TicketListQuery,
    },
    server::{
        controller::{
            ticket::{
                assign_ticket, change_status, create_ticket, delete_ticket, get_ticket,
                get_ticket_stats, list_tickets,
            },
            vote::cast_vote,
        },
        error::Error,
        model::session::user::SessionUserId,
    },
};
use helpdesk_test_utils::prelude::*;

use super::status_of;
use crate::util::TestContextExt;

#[tokio::test]
/// Expect 201 when a signed in user files a ticket
async fn create_ticket_returns_created() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    let category = test.category().insert_category("Hardware").await.unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = create_ticket(
        State(test.into_app_state()),
        test.session.clone(),
        Json(CreateTicketDto {
            subject: "Laptop won't boot".to_string(),
            description: "Black screen after the update".to_string(),
            category_id: category.id,
            priority: None,
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::CREATED);

    Ok(())
}

#[tokio::test]
/// Expect 400 for a blank subject
async fn create_ticket_rejects_blank_subject() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    let category = test.category().insert_category("Hardware").await.unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = create_ticket(
        State(test.into_app_state()),
        test.session.clone(),
        Json(CreateTicketDto {
            subject: " ".to_string(),
            description: "Black screen after the update".to_string(),
            category_id: category.id,
            priority: None,
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
/// Expect 401 when listing tickets without a session
async fn list_tickets_requires_session() -> Result<(), Error> {
    let test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();

    let result = list_tickets(
        State(test.into_app_state()),
        test.session.clone(),
        Query(TicketListQuery::default()),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
/// Expect 403 for a deactivated user with a session from before the deactivation
async fn list_tickets_rejects_inactive_user() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test
        .user()
        .insert_inactive_user(UserRole::EndUser)
        .await
        .unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = list_tickets(
        State(test.into_app_state()),
        test.session.clone(),
        Query(TicketListQuery::default()),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect 404 for a ticket that does not exist
async fn get_ticket_not_found() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = get_ticket(State(test.into_app_state()), test.session.clone(), Path(1)).await;

    assert_eq!(status_of(result), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect 409 for a transition the status machine does not allow
async fn change_status_invalid_transition_conflicts() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let agent = test
        .user()
        .insert_user(UserRole::SupportAgent)
        .await
        .unwrap();
    let category = test.category().insert_category("Hardware").await.unwrap();
    let ticket = test
        .ticket()
        .insert_ticket_with_status(agent.id, category.id, TicketStatus::Closed)
        .await
        .unwrap();
    SessionUserId::insert(&test.session, agent.id).await?;

    let result = change_status(
        State(test.into_app_state()),
        test.session.clone(),
        Path(ticket.id),
        Json(ChangeStatusDto {
            status: TicketStatus::InProgress,
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
/// Expect 403 when an end user assigns a ticket
async fn assign_ticket_requires_staff() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    let agent = test
        .user()
        .insert_user(UserRole::SupportAgent)
        .await
        .unwrap();
    let category = test.category().insert_category("Hardware").await.unwrap();
    let ticket = test
        .ticket()
        .insert_ticket(user.id, category.id)
        .await
        .unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = assign_ticket(
        State(test.into_app_state()),
        test.session.clone(),
        Path(ticket.id),
        Json(AssignTicketDto {
            assignee_id: Some(agent.id),
        }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect 204 when the creator deletes an untouched ticket
async fn delete_ticket_returns_no_content() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    let category = test.category().insert_category("Hardware").await.unwrap();
    let ticket = test
        .ticket()
        .insert_ticket(user.id, category.id)
        .await
        .unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = delete_ticket(
        State(test.into_app_state()),
        test.session.clone(),
        Path(ticket.id),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
/// Expect 403 when an end user asks for ticket statistics
async fn stats_require_staff() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = get_ticket_stats(State(test.into_app_state()), test.session.clone()).await;

    assert_eq!(status_of(result), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
/// Expect 409 when voting on a closed ticket
async fn cast_vote_on_closed_ticket_conflicts() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    let category = test.category().insert_category("Hardware").await.unwrap();
    let ticket = test
        .ticket()
        .insert_ticket_with_status(user.id, category.id, TicketStatus::Closed)
        .await
        .unwrap();
    SessionUserId::insert(&test.session, user.id).await?;

    let result = cast_vote(
        State(test.into_app_state()),
        test.session.clone(),
        Path(ticket.id),
        Json(CastVoteDto { is_upvote: true }),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::CONFLICT);

    Ok(())
}
