//! Tests for CategoryService.

use entity::sea_orm_active_enums::UserRole;
use helpdesk::{
    model::category::{CreateCategoryDto, UpdateCategoryDto},
    server::{
        error::{auth::AuthError, category::CategoryError, Error},
        service::category::CategoryService,
    },
};
use helpdesk_test_utils::prelude::*;

fn new_category(name: &str) -> CreateCategoryDto {
    CreateCategoryDto {
        name: name.to_string(),
        description: Some("   ".to_string()),
        color: "#A1B2C3".to_string(),
    }
}

/// Expect inactive categories only for staff that ask for them
#[tokio::test]
async fn list_hides_inactive_from_end_users() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_helpdesk_tables()
        .with_category("Billing")
        .build()
        .await?;
    test.category().insert_inactive_category("Legacy").await?;
    let user = test.user().insert_user(UserRole::EndUser).await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;
    let category_service = CategoryService::new(&test.db);

    let for_user = category_service.list(&user, true).await;
    assert!(for_user.is_ok(), "Error: {:?}", for_user);
    assert_eq!(for_user.unwrap().len(), 1);

    let for_agent = category_service.list(&agent, true).await;
    assert!(for_agent.is_ok(), "Error: {:?}", for_agent);
    assert_eq!(for_agent.unwrap().len(), 2);

    Ok(())
}

/// Expect a trimmed name and blank description stored as none
#[tokio::test]
async fn create_normalizes_input() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;

    let result = CategoryService::new(&test.db)
        .create(&admin, new_category("  Hardware  "))
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let category = result.unwrap();
    assert_eq!(category.name, "Hardware");
    assert!(category.description.is_none());
    assert!(category.is_active);

    Ok(())
}

/// Expect NameTaken for a duplicate name
#[tokio::test]
async fn create_rejects_duplicate_name() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_helpdesk_tables()
        .with_category("Billing")
        .build()
        .await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;

    let result = CategoryService::new(&test.db)
        .create(&admin, new_category("Billing"))
        .await;

    assert!(matches!(
        result,
        Err(Error::CategoryError(CategoryError::NameTaken(_)))
    ));

    Ok(())
}

/// Expect InvalidColor for a color that is not #RRGGBB
#[tokio::test]
async fn create_rejects_invalid_color() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;

    let mut payload = new_category("Network");
    payload.color = "blue".to_string();
    let result = CategoryService::new(&test.db).create(&admin, payload).await;

    assert!(matches!(
        result,
        Err(Error::CategoryError(CategoryError::InvalidColor(_)))
    ));

    Ok(())
}

/// Expect Forbidden when a support agent creates a category
#[tokio::test]
async fn create_requires_admin() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let agent = test.user().insert_user(UserRole::SupportAgent).await?;

    let result = CategoryService::new(&test.db)
        .create(&agent, new_category("Network"))
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden { .. }))
    ));

    Ok(())
}

/// Expect renaming a category to its own name to succeed
#[tokio::test]
async fn update_allows_keeping_own_name() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let category = test.category().insert_category("Billing").await?;

    let result = CategoryService::new(&test.db)
        .update(
            &admin,
            category.id,
            UpdateCategoryDto {
                name: Some("Billing".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(!result.unwrap().is_active);

    Ok(())
}

/// Expect NameTaken when renaming onto another category's name
#[tokio::test]
async fn update_rejects_name_of_other_category() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    test.category().insert_category("Billing").await?;
    let other = test.category().insert_category("Hardware").await?;

    let result = CategoryService::new(&test.db)
        .update(
            &admin,
            other.id,
            UpdateCategoryDto {
                name: Some("Billing".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(Error::CategoryError(CategoryError::NameTaken(_)))
    ));

    Ok(())
}

/// Expect InUse when tickets still reference the category
#[tokio::test]
async fn delete_rejects_category_in_use() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let category = test.category().insert_category("Billing").await?;
    test.ticket().insert_ticket(admin.id, category.id).await?;

    let result = CategoryService::new(&test.db)
        .delete(&admin, category.id)
        .await;

    assert!(matches!(
        result,
        Err(Error::CategoryError(CategoryError::InUse(_)))
    ));

    Ok(())
}

/// Expect an unused category to be deleted
#[tokio::test]
async fn delete_removes_unused_category() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_helpdesk_tables().build().await?;
    let admin = test.user().insert_user(UserRole::Admin).await?;
    let category = test.category().insert_category("Billing").await?;
    let category_service = CategoryService::new(&test.db);

    let result = category_service.delete(&admin, category.id).await;
    assert!(result.is_ok(), "Error: {:?}", result);

    let again = category_service.delete(&admin, category.id).await;
    assert!(matches!(
        again,
        Err(Error::CategoryError(CategoryError::NotFound(_)))
    ));

    Ok(())
}
