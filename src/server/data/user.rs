use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::query::{Page, PageRequest, UserFilter};

/// Fields required to mirror a new identity provider user.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub clerk_user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

/// Profile fields refreshed from the identity provider. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active end user
    pub async fn create(&self, new_user: NewUser) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::user::ActiveModel {
            clerk_user_id: ActiveValue::Set(new_user.clerk_user_id),
            email: ActiveValue::Set(new_user.email),
            first_name: ActiveValue::Set(new_user.first_name),
            last_name: ActiveValue::Set(new_user.last_name),
            image_url: ActiveValue::Set(new_user.image_url),
            role: ActiveValue::Set(UserRole::EndUser),
            suspended: ActiveValue::Set(false),
            is_active: ActiveValue::Set(true),
            email_notifications: ActiveValue::Set(true),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn get_by_clerk_user_id(
        &self,
        clerk_user_id: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::ClerkUserId.eq(clerk_user_id))
            .one(self.db)
            .await
    }

    /// Fetches every user whose ID is in `user_ids`, IDs without a user are skipped
    pub async fn get_many_by_ids(
        &self,
        user_ids: &[i32],
    ) -> Result<Vec<entity::user::Model>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Pages through users matching `filter`, oldest accounts first
    pub async fn find_many(
        &self,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<Page<entity::user::Model>, DbErr> {
        let mut query = entity::prelude::User::find();

        if let Some(role) = filter.role {
            query = query.filter(entity::user::Column::Role.eq(role));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(entity::user::Column::IsActive.eq(is_active));
        }
        if let Some(suspended) = filter.suspended {
            query = query.filter(entity::user::Column::Suspended.eq(suspended));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                query = query.filter(
                    Condition::any()
                        .add(entity::user::Column::Email.contains(search))
                        .add(entity::user::Column::FirstName.contains(search))
                        .add(entity::user::Column::LastName.contains(search)),
                );
            }
        }

        let paginator = query
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, page.per_page());

        let total_items = paginator.num_items().await?;
        let items = paginator.fetch_page(page.page_index()).await?;

        Ok(Page::new(items, page, total_items))
    }

    /// Users that can be assigned tickets: active, unsuspended support agents and admins
    pub async fn find_staff(&self) -> Result<Vec<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Role.is_in([UserRole::SupportAgent, UserRole::Admin]))
            .filter(entity::user::Column::IsActive.eq(true))
            .filter(entity::user::Column::Suspended.eq(false))
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        profile: ProfileUpdate,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, move |user_am| {
            if let Some(email) = profile.email {
                user_am.email = ActiveValue::Set(email);
            }
            if let Some(first_name) = profile.first_name {
                user_am.first_name = ActiveValue::Set(Some(first_name));
            }
            if let Some(last_name) = profile.last_name {
                user_am.last_name = ActiveValue::Set(Some(last_name));
            }
            if let Some(image_url) = profile.image_url {
                user_am.image_url = ActiveValue::Set(Some(image_url));
            }
        })
        .await
    }

    pub async fn update_role(
        &self,
        user_id: i32,
        role: UserRole,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, move |user_am| {
            user_am.role = ActiveValue::Set(role);
        })
        .await
    }

    pub async fn set_suspended(
        &self,
        user_id: i32,
        suspended: bool,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, move |user_am| {
            user_am.suspended = ActiveValue::Set(suspended);
        })
        .await
    }

    pub async fn set_active(
        &self,
        user_id: i32,
        is_active: bool,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, move |user_am| {
            user_am.is_active = ActiveValue::Set(is_active);
        })
        .await
    }

    pub async fn update_email_notifications(
        &self,
        user_id: i32,
        email_notifications: bool,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, move |user_am| {
            user_am.email_notifications = ActiveValue::Set(email_notifications);
        })
        .await
    }

    /// Records a sign-in at the current time
    pub async fn touch_last_login(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, |user_am| {
            user_am.last_login_at = ActiveValue::Set(Some(Utc::now().naive_utc()));
        })
        .await
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await
    }

    /// Loads the user, applies `apply` and saves it with a fresh `updated_at`.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    async fn update_with<F>(
        &self,
        user_id: i32,
        apply: F,
    ) -> Result<Option<entity::user::Model>, DbErr>
    where
        F: FnOnce(&mut entity::user::ActiveModel) + Send,
    {
        let Some(user) = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        apply(&mut user_am);
        user_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}
