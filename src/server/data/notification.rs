use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::NotificationType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::query::{Page, PageRequest};

#[derive(Clone, Debug)]
pub struct NewNotification {
    pub user_id: i32,
    pub ticket_id: Option<i32>,
    pub r#type: NotificationType,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    fn into_active_model(self, created_at: NaiveDateTime) -> entity::notification::ActiveModel {
        entity::notification::ActiveModel {
            r#type: ActiveValue::Set(self.r#type),
            title: ActiveValue::Set(self.title),
            message: ActiveValue::Set(self.message),
            is_read: ActiveValue::Set(false),
            user_id: ActiveValue::Set(self.user_id),
            ticket_id: ActiveValue::Set(self.ticket_id),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        }
    }
}

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    /// Creates a new instance of [`NotificationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<entity::notification::Model, DbErr> {
        notification
            .into_active_model(Utc::now().naive_utc())
            .insert(self.db)
            .await
    }

    /// Inserts notifications in bulk, returning how many were inserted
    pub async fn create_many(&self, notifications: Vec<NewNotification>) -> Result<u64, DbErr> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let now = Utc::now().naive_utc();
        let count = notifications.len() as u64;
        let models = notifications
            .into_iter()
            .map(|notification| notification.into_active_model(now));

        entity::prelude::Notification::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(count)
    }

    pub async fn get_by_id(
        &self,
        notification_id: i32,
    ) -> Result<Option<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find_by_id(notification_id)
            .one(self.db)
            .await
    }

    /// Newest first
    pub async fn find_by_user(
        &self,
        user_id: i32,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Page<entity::notification::Model>, DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(entity::notification::Column::IsRead.eq(false));
        }

        let paginator = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, page.per_page());

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.page_index()).await?;

        Ok(Page::new(items, page, total))
    }

    pub async fn count_unread(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Returns the number of rows updated, 0 if the notification does not exist
    pub async fn mark_read(&self, notification_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(entity::notification::ActiveModel {
                is_read: ActiveValue::Set(true),
                ..Default::default()
            })
            .filter(entity::notification::Column::Id.eq(notification_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks every unread notification of the user as read, returning how many changed
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(entity::notification::ActiveModel {
                is_read: ActiveValue::Set(true),
                ..Default::default()
            })
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, notification_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Notification::delete_by_id(notification_id)
            .exec(self.db)
            .await
    }

    /// Deletes read notifications created before `cutoff`. Unread ones are kept regardless of age.
    pub async fn delete_read_before(&self, cutoff: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::IsRead.eq(true))
            .filter(entity::notification::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
