//! User fixture utilities.
//!
//! This module provides methods for inserting users and factory functions for creating
//! in-memory model instances.

pub mod factory;

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_EMAIL_DOMAIN, error::TestError, model::UserModel, TestContext};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active, unsuspended user with a generated Clerk user ID.
    pub async fn insert_user(&mut self, role: UserRole) -> Result<UserModel, TestError> {
        let sequence = self.setup.next_sequence();
        let clerk_user_id = format!("user_test_{}", sequence);

        self.insert_user_with_clerk_id(&clerk_user_id, role).await
    }

    /// Insert an active, unsuspended user with the provided Clerk user ID.
    ///
    /// The email address is derived from the Clerk user ID so it stays unique.
    pub async fn insert_user_with_clerk_id(
        &mut self,
        clerk_user_id: &str,
        role: UserRole,
    ) -> Result<UserModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            clerk_user_id: ActiveValue::Set(clerk_user_id.to_string()),
            email: ActiveValue::Set(format!("{}@{}", clerk_user_id, TEST_EMAIL_DOMAIN)),
            first_name: ActiveValue::Set(Some("Test".to_string())),
            last_name: ActiveValue::Set(Some("User".to_string())),
            image_url: ActiveValue::Set(None),
            role: ActiveValue::Set(role),
            suspended: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            email_notifications: ActiveValue::Set(true),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a user that has been suspended by an admin.
    pub async fn insert_suspended_user(&mut self, role: UserRole) -> Result<UserModel, TestError> {
        let user = self.insert_user(role).await?;

        Ok(entity::prelude::User::update(entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            suspended: ActiveValue::Set(true),
            ..Default::default()
        })
        .exec(&self.setup.db)
        .await?)
    }

    /// Insert a user whose account has been deactivated.
    pub async fn insert_inactive_user(&mut self, role: UserRole) -> Result<UserModel, TestError> {
        let user = self.insert_user(role).await?;

        Ok(entity::prelude::User::update(entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            is_active: ActiveValue::Set(false),
            ..Default::default()
        })
        .exec(&self.setup.db)
        .await?)
    }
}
