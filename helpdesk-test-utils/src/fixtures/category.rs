use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_CATEGORY_COLOR, error::TestError, model::CategoryModel, TestContext};

impl TestContext {
    pub fn category<'a>(&'a mut self) -> CategoryFixtures<'a> {
        CategoryFixtures { setup: self }
    }
}

pub struct CategoryFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> CategoryFixtures<'a> {
    /// Insert an active category with the given name.
    pub async fn insert_category(&self, name: &str) -> Result<CategoryModel, TestError> {
        self.insert(name, true).await
    }

    /// Insert a category that has been deactivated.
    pub async fn insert_inactive_category(&self, name: &str) -> Result<CategoryModel, TestError> {
        self.insert(name, false).await
    }

    async fn insert(&self, name: &str, is_active: bool) -> Result<CategoryModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Category::insert(entity::category::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                description: ActiveValue::Set(None),
                color: ActiveValue::Set(TEST_CATEGORY_COLOR.to_string()),
                is_active: ActiveValue::Set(is_active),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
