//! Tests for UserService administration methods.

use entity::sea_orm_active_enums::UserRole;
use helpdesk::server::{
    error::{auth::AuthError, user::UserError, Error},
    model::query::{PageRequest, UserFilter},
    service::user::UserService,
};
use helpdesk_test_utils::prelude::*;

/// Expect None for a user ID that does not exist
#[tokio::test]
async fn get_user_returns_none_for_unknown_id() -> Result<(), TestError> {
    let test = TestBuilder::new().with_helpdesk_tables().build().await?;

    let result = UserService::new(&test.db).get_user(1).await;

    assert!(matches!(result, Ok(None)));

    Ok(())
}

/// Expect DbErr when the user table is missing
#[tokio::test]
async fn get_user_fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = UserService::new(&test.db).get_user(1).await;

    assert!(matches!(result, Err(Error::DbErr(_))));

    Ok(())
}

/// Expect admins to page through users filtered by role
#[tokio::test]
async fn list_users_filters_by_role() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_helpdesk_tables()
        .with_user("user_admin", UserRole::Admin)
        .with_user("user_agent", UserRole::SupportAgent)
        .with_user("user_end", UserRole::EndUser)
        .build()
        .await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;

    let filter = UserFilter {
        role: Some(UserRole::SupportAgent),
        ..Default::default()
    };
    let result = UserService::new(&test.db)
        .list_users(&admin, filter, PageRequest::default())
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let page = result.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].clerk_user_id, "user_agent");

    Ok(())
}

/// Expect Forbidden when a support agent lists users
#[tokio::test]
async fn list_users_requires_admin() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;

    let result = UserService::new(&test.db)
        .list_users(&agent, UserFilter::default(), PageRequest::default())
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    Ok(())
}

/// Expect only active, unsuspended staff in the staff list
#[tokio::test]
async fn list_staff_excludes_end_users_and_suspended_staff() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    test.user().insert_user(UserRole::EndUser).await?;
    test.user()
        .insert_suspended_user(UserRole::SupportAgent)
        .await?;

    let result = UserService::new(&test.db).list_staff(&agent).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let mut ids: Vec<i32> = result.unwrap().into_iter().map(|user| user.id).collect();
    ids.sort();
    assert_eq!(ids, vec![agent.id, admin.id]);

    Ok(())
}

/// Expect an admin to promote an end user
#[tokio::test]
async fn update_role_promotes_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;

    let result = UserService::new(&test.db)
        .update_role(&admin, user.id, UserRole::SupportAgent)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap().role, UserRole::SupportAgent);

    Ok(())
}

/// Expect CannotModifySelf when an admin demotes themselves
#[tokio::test]
async fn update_role_rejects_self() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;

    let result = UserService::new(&test.db)
        .update_role(&admin, admin.id, UserRole::EndUser)
        .await;

    assert!(matches!(
        result,
        Err(Error::UserError(UserError::CannotModifySelf(_)))
    ));

    Ok(())
}

/// Expect NotFound when suspending a user that does not exist
#[tokio::test]
async fn set_suspended_fails_for_unknown_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;

    let result = UserService::new(&test.db)
        .set_suspended(&admin, admin.id + 100, true)
        .await;

    assert!(matches!(
        result,
        Err(Error::UserError(UserError::NotFound(_)))
    ));

    Ok(())
}

/// Expect suspending and deactivating to be reflected on the user
#[tokio::test]
async fn suspends_and_deactivates_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let user_service = UserService::new(&test.db);

    let suspended = user_service.set_suspended(&admin, user.id, true).await;
    assert!(suspended.is_ok(), "Error: {:?}", suspended);
    assert!(suspended.unwrap().suspended);

    let deactivated = user_service.set_active(&admin, user.id, false).await;
    assert!(deactivated.is_ok(), "Error: {:?}", deactivated);
    assert!(!deactivated.unwrap().is_active);

    Ok(())
}

/// Expect users to switch off email notifications for themselves
#[tokio::test]
async fn update_preferences_changes_own_flag() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;

    let result = UserService::new(&test.db)
        .update_preferences(&user, false)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(!result.unwrap().email_notifications);

    Ok(())
}
