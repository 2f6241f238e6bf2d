use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Changes applied by [`CategoryRepository::update`]. `None` leaves a field unchanged, a
/// `Some(None)` description clears it.
#[derive(Clone, Debug, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

pub struct CategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    /// Creates a new instance of [`CategoryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an active category
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        color: String,
    ) -> Result<entity::category::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let category = entity::category::ActiveModel {
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            color: ActiveValue::Set(color),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        category.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        category_id: i32,
    ) -> Result<Option<entity::category::Model>, DbErr> {
        entity::prelude::Category::find_by_id(category_id)
            .one(self.db)
            .await
    }

    /// Exact, case-sensitive name lookup
    pub async fn get_by_name(&self, name: &str) -> Result<Option<entity::category::Model>, DbErr> {
        entity::prelude::Category::find()
            .filter(entity::category::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Categories ordered by name
    pub async fn find_many(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<entity::category::Model>, DbErr> {
        let mut query = entity::prelude::Category::find();

        if !include_inactive {
            query = query.filter(entity::category::Column::IsActive.eq(true));
        }

        query
            .order_by_asc(entity::category::Column::Name)
            .all(self.db)
            .await
    }

    /// Returns `Ok(None)` when the category does not exist
    pub async fn update(
        &self,
        category_id: i32,
        changes: CategoryChanges,
    ) -> Result<Option<entity::category::Model>, DbErr> {
        let Some(category) = self.get_by_id(category_id).await? else {
            return Ok(None);
        };

        let mut category_am = category.into_active_model();
        if let Some(name) = changes.name {
            category_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = changes.description {
            category_am.description = ActiveValue::Set(description);
        }
        if let Some(color) = changes.color {
            category_am.color = ActiveValue::Set(color);
        }
        if let Some(is_active) = changes.is_active {
            category_am.is_active = ActiveValue::Set(is_active);
        }
        category_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let category = category_am.update(self.db).await?;

        Ok(Some(category))
    }

    /// Deletes a category
    ///
    /// Fails with a foreign key error while tickets reference the category; check
    /// [`Self::count_tickets`] first.
    pub async fn delete(&self, category_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Category::delete_by_id(category_id)
            .exec(self.db)
            .await
    }

    /// Number of tickets filed under the category
    pub async fn count_tickets(&self, category_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::CategoryId.eq(category_id))
            .count(self.db)
            .await
    }
}
