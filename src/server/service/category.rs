//! Ticket category service.

use sea_orm::{DatabaseConnection, DbErr};

use crate::{
    model::category::{CategoryDto, CreateCategoryDto, UpdateCategoryDto},
    server::{
        data::{
            category::{CategoryChanges, CategoryRepository},
            is_unique_violation,
        },
        error::{category::CategoryError, Error},
        model::db::UserModel,
        service::retry::RetryContext,
        util::permission::require_admin,
    },
};

const MAX_NAME_LENGTH: usize = 50;

/// Service for listing and administering ticket categories.
pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    /// Creates a new instance of CategoryService.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Categories ordered by name.
    ///
    /// Inactive categories are only included for staff that ask for them; the flag is ignored
    /// for end users.
    pub async fn list(
        &self,
        actor: &UserModel,
        include_inactive: bool,
    ) -> Result<Vec<CategoryDto>, Error> {
        let include_inactive = include_inactive && actor.role.is_staff();

        let ctx = RetryContext::new();
        let db = self.db.clone();

        ctx.execute_with_retry("list categories", || {
            let db = db.clone();

            Box::pin(async move {
                let category_repo = CategoryRepository::new(&db);
                let categories = category_repo.find_many(include_inactive).await?;

                Ok(categories.into_iter().map(CategoryDto::from).collect())
            })
        })
        .await
    }

    /// Creates an active category. Admin only.
    ///
    /// # Returns
    /// - `Ok(CategoryDto)` - Created category
    /// - `Err(Error::CategoryError(CategoryError::InvalidName))` - Name empty or too long after trimming
    /// - `Err(Error::CategoryError(CategoryError::InvalidColor))` - Color is not `#RRGGBB`
    /// - `Err(Error::CategoryError(CategoryError::NameTaken))` - Another category has the name
    pub async fn create(
        &self,
        actor: &UserModel,
        payload: CreateCategoryDto,
    ) -> Result<CategoryDto, Error> {
        require_admin(actor, "create categories")?;

        let name = validate_name(&payload.name)?;
        validate_color(&payload.color)?;
        let description = normalize_description(payload.description);

        let category_repo = CategoryRepository::new(self.db);
        if category_repo.get_by_name(&name).await?.is_some() {
            return Err(CategoryError::NameTaken(name).into());
        }

        let category = category_repo
            .create(name.clone(), description, payload.color)
            .await
            .map_err(|err| name_taken_or(err, &name))?;

        tracing::info!(
            "Admin user ID {} created category ID {}",
            actor.id,
            category.id
        );

        Ok(category.into())
    }

    /// Applies the given changes to a category. Admin only.
    pub async fn update(
        &self,
        actor: &UserModel,
        category_id: i32,
        payload: UpdateCategoryDto,
    ) -> Result<CategoryDto, Error> {
        require_admin(actor, "update categories")?;

        let name = payload.name.as_deref().map(validate_name).transpose()?;
        if let Some(color) = payload.color.as_deref() {
            validate_color(color)?;
        }

        let category_repo = CategoryRepository::new(self.db);
        if let Some(name) = name.as_deref() {
            if let Some(existing) = category_repo.get_by_name(name).await? {
                if existing.id != category_id {
                    return Err(CategoryError::NameTaken(name.to_string()).into());
                }
            }
        }

        let changes = CategoryChanges {
            name: name.clone(),
            description: payload.description.map(normalize_description),
            color: payload.color,
            is_active: payload.is_active,
        };

        let category = category_repo
            .update(category_id, changes)
            .await
            .map_err(|err| match name.as_deref() {
                Some(name) => name_taken_or(err, name),
                None => err.into(),
            })?
            .ok_or(CategoryError::NotFound(category_id))?;

        Ok(category.into())
    }

    /// Deletes a category no ticket references. Admin only.
    ///
    /// # Returns
    /// - `Ok(())` - Category deleted
    /// - `Err(Error::CategoryError(CategoryError::NotFound))` - Category does not exist
    /// - `Err(Error::CategoryError(CategoryError::InUse))` - Tickets reference it, deactivate instead
    pub async fn delete(&self, actor: &UserModel, category_id: i32) -> Result<(), Error> {
        require_admin(actor, "delete categories")?;

        let category_repo = CategoryRepository::new(self.db);
        if category_repo.get_by_id(category_id).await?.is_none() {
            return Err(CategoryError::NotFound(category_id).into());
        }
        if category_repo.count_tickets(category_id).await? > 0 {
            return Err(CategoryError::InUse(category_id).into());
        }

        category_repo.delete(category_id).await?;

        tracing::info!(
            "Admin user ID {} deleted category ID {}",
            actor.id,
            category_id
        );

        Ok(())
    }
}

/// Maps a unique index violation on the name to `NameTaken`
fn name_taken_or(err: DbErr, name: &str) -> Error {
    if is_unique_violation(&err) {
        CategoryError::NameTaken(name.to_string()).into()
    } else {
        err.into()
    }
}

fn validate_name(name: &str) -> Result<String, CategoryError> {
    let name = name.trim();
    let length = name.chars().count();

    if length == 0 || length > MAX_NAME_LENGTH {
        return Err(CategoryError::InvalidName {
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

/// Accepts `#RRGGBB` with either letter case.
fn validate_color(color: &str) -> Result<(), CategoryError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(CategoryError::InvalidColor(color.to_string()));
    }

    Ok(())
}

/// Blank descriptions are stored as `None`.
fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
