//! Tests for AuthService::sign_in.

use entity::sea_orm_active_enums::UserRole;
use helpdesk::server::{
    error::{auth::AuthError, Error},
    service::auth::AuthService,
};
use helpdesk_test_utils::prelude::*;

use crate::util::test_utils::test_token_verifier;

/// Expect a new end user to be created on first sign-in
#[tokio::test]
async fn creates_user_on_first_sign_in() -> Result<(), TestError> {
    let test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let verifier = test_token_verifier();
    let token = create_test_token("user_new", Some(&test_email("user_new")), 3600)?;

    let result = AuthService::new(&test.db, &verifier).sign_in(&token).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let user = result.unwrap();
    assert_eq!(user.clerk_user_id, "user_new");
    assert_eq!(user.email, test_email("user_new"));
    assert_eq!(user.role, UserRole::EndUser);
    assert!(user.last_login_at.is_some());

    Ok(())
}

/// Expect an existing user to be signed in and their email refreshed from the token
#[tokio::test]
async fn refreshes_existing_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let existing = test
        .user()
        .insert_user_with_clerk_id("user_existing", UserRole::SupportAgent)
        .await?;
    let verifier = test_token_verifier();
    let token = create_test_token("user_existing", Some("renamed@helpdesk.test"), 3600)?;

    let result = AuthService::new(&test.db, &verifier).sign_in(&token).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let user = result.unwrap();
    assert_eq!(user.id, existing.id);
    assert_eq!(user.email, "renamed@helpdesk.test");
    // Role is never taken from the token
    assert_eq!(user.role, UserRole::SupportAgent);
    assert!(user.last_login_at.is_some());

    Ok(())
}

/// Expect MissingEmailClaim when a new user's token has no email
#[tokio::test]
async fn fails_for_new_user_without_email() -> Result<(), TestError> {
    let test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let verifier = test_token_verifier();
    let token = create_test_token("user_no_email", None, 3600)?;

    let result = AuthService::new(&test.db, &verifier).sign_in(&token).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::MissingEmailClaim(_)))
    ));

    Ok(())
}

/// Expect an existing user to sign in without an email claim
#[tokio::test]
async fn existing_user_does_not_need_email() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let existing = test
        .user()
        .insert_user_with_clerk_id("user_known", UserRole::EndUser)
        .await?;
    let verifier = test_token_verifier();
    let token = create_test_token("user_known", None, 3600)?;

    let result = AuthService::new(&test.db, &verifier).sign_in(&token).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap().email, existing.email);

    Ok(())
}

/// Expect UserSuspended for a suspended user
#[tokio::test]
async fn fails_for_suspended_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_suspended_user(UserRole::EndUser).await?;
    let verifier = test_token_verifier();
    let token = create_test_token(&user.clerk_user_id, Some(&user.email), 3600)?;

    let result = AuthService::new(&test.db, &verifier).sign_in(&token).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::UserSuspended(id))) if id == user.id
    ));

    Ok(())
}

/// Expect UserInactive for a deactivated user
#[tokio::test]
async fn fails_for_inactive_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let user = test.user().insert_inactive_user(UserRole::EndUser).await?;
    let verifier = test_token_verifier();
    let token = create_test_token(&user.clerk_user_id, Some(&user.email), 3600)?;

    let result = AuthService::new(&test.db, &verifier).sign_in(&token).await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::UserInactive(_)))
    ));

    Ok(())
}

/// Expect JwtError for an expired token without touching the database
#[tokio::test]
async fn fails_for_expired_token() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let verifier = test_token_verifier();
    let token = create_test_token("user_expired", Some(&test_email("user_expired")), -3600)?;

    let result = AuthService::new(&test.db, &verifier).sign_in(&token).await;

    assert!(matches!(result, Err(Error::JwtError(_))));

    Ok(())
}
