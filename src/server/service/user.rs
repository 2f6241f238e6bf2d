//! User administration service.
//!
//! Admins manage roles, suspension and activation of accounts; every user manages their own
//! notification preferences. Accounts themselves are created by sign-in, see
//! [`AuthService`](crate::server::service::auth::AuthService).

use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::{
    model::user::{UserDto, UserSummaryDto},
    server::{
        data::user::UserRepository,
        error::{user::UserError, Error},
        model::{
            db::UserModel,
            query::{Page, PageRequest, UserFilter},
        },
        service::retry::RetryContext,
        util::permission::{require_admin, require_staff},
    },
};

/// Service for managing user accounts.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of UserService.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(UserDto))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get user ID {}", user_id), || {
            let db = db.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);

                Ok(user_repo.get_by_id(user_id).await?.map(UserDto::from))
            })
        })
        .await
    }

    /// Pages through users matching `filter`. Admin only.
    pub async fn list_users(
        &self,
        actor: &UserModel,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Page<UserDto>, Error> {
        require_admin(actor, "list users")?;

        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list users", || {
            let db = db.clone();
            let filter = filter.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);
                let users = user_repo.find_many(&filter, page).await?;

                Ok(users.map(UserDto::from))
            })
        })
        .await
    }

    /// Users tickets can be assigned to. Staff only.
    pub async fn list_staff(&self, actor: &UserModel) -> Result<Vec<UserSummaryDto>, Error> {
        require_staff(actor, "list staff")?;

        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list staff", || {
            let db = db.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);
                let staff = user_repo.find_staff().await?;

                Ok(staff.iter().map(UserSummaryDto::from).collect())
            })
        })
        .await
    }

    /// Changes the role of another user. Admin only.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - Updated user
    /// - `Err(Error::AuthError(AuthError::Forbidden))` - Actor is not an admin
    /// - `Err(Error::UserError(UserError::CannotModifySelf))` - Admin targeted themselves
    /// - `Err(Error::UserError(UserError::NotFound))` - Target does not exist
    pub async fn update_role(
        &self,
        actor: &UserModel,
        user_id: i32,
        role: UserRole,
    ) -> Result<UserDto, Error> {
        require_admin(actor, "change user roles")?;
        ensure_not_self(actor, user_id)?;

        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .update_role(user_id, role)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        tracing::info!(
            "Admin user ID {} changed role of user ID {} to {:?}",
            actor.id,
            user_id,
            role
        );

        Ok(user.into())
    }

    /// Suspends or unsuspends another user. Admin only.
    pub async fn set_suspended(
        &self,
        actor: &UserModel,
        user_id: i32,
        suspended: bool,
    ) -> Result<UserDto, Error> {
        require_admin(actor, "suspend users")?;
        ensure_not_self(actor, user_id)?;

        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .set_suspended(user_id, suspended)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        tracing::info!(
            "Admin user ID {} set suspended={} on user ID {}",
            actor.id,
            suspended,
            user_id
        );

        Ok(user.into())
    }

    /// Activates or deactivates another user. Admin only.
    pub async fn set_active(
        &self,
        actor: &UserModel,
        user_id: i32,
        is_active: bool,
    ) -> Result<UserDto, Error> {
        require_admin(actor, "deactivate users")?;
        ensure_not_self(actor, user_id)?;

        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .set_active(user_id, is_active)
            .await?
            .ok_or(UserError::NotFound(user_id))?;

        tracing::info!(
            "Admin user ID {} set is_active={} on user ID {}",
            actor.id,
            is_active,
            user_id
        );

        Ok(user.into())
    }

    /// Updates the actor's own email notification preference.
    pub async fn update_preferences(
        &self,
        actor: &UserModel,
        email_notifications: bool,
    ) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .update_email_notifications(actor.id, email_notifications)
            .await?
            .ok_or(UserError::NotFound(actor.id))?;

        Ok(user.into())
    }
}

fn ensure_not_self(actor: &UserModel, user_id: i32) -> Result<(), UserError> {
    if actor.id == user_id {
        return Err(UserError::CannotModifySelf(actor.id));
    }

    Ok(())
}
