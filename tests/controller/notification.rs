use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use entity::sea_orm_active_enums::{NotificationType, UserRole};
use helpdesk::server::{
    controller::notification::{get_unread_count, mark_all_read, mark_read},
    error::Error,
    model::session::user::SessionUserId,
};
use helpdesk_test_utils::prelude::*;

use super::status_of;
use crate::util::TestContextExt;

#[tokio::test]
/// Expect 200 for the unread count and for marking everything read
async fn counts_and_marks_all_read() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let user = test.user().insert_user(UserRole::EndUser).await.unwrap();
    test.ticket()
        .insert_notification(user.id, None, NotificationType::CommentAdded)
        .await
        .unwrap();
    SessionUserId::insert(&test.session, user.id).await?;
    let state = test.into_app_state();

    let count = get_unread_count(State(state.clone()), test.session.clone()).await;
    assert_eq!(status_of(count), StatusCode::OK);

    let marked = mark_all_read(State(state), test.session.clone()).await;
    assert_eq!(status_of(marked), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 404 when marking another user's notification read
async fn mark_read_of_other_user_not_found() -> Result<(), Error> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await.unwrap();
    let owner = test.user().insert_user(UserRole::EndUser).await.unwrap();
    let other = test.user().insert_user(UserRole::EndUser).await.unwrap();
    let notification = test
        .ticket()
        .insert_notification(owner.id, None, NotificationType::CommentAdded)
        .await
        .unwrap();
    SessionUserId::insert(&test.session, other.id).await?;

    let result = mark_read(
        State(test.into_app_state()),
        test.session.clone(),
        Path(notification.id),
    )
    .await;

    assert_eq!(status_of(result), StatusCode::NOT_FOUND);

    Ok(())
}
