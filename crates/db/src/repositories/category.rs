//! Category repository.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use crate::entities::categories;
use outlay_core::recurring::{CategoryLookup, CategoryRef, RecurringError};
use outlay_shared::types::CategoryId;

/// Category repository implementation.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Create a new category repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the category with `name`, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn find_or_create(
        &self,
        name: &str,
        description: Option<&str>,
        is_default: bool,
    ) -> Result<categories::Model, DbErr> {
        if let Some(existing) = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now();
        categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            name: Set(name.to_string()),
            description: Set(description.map(ToString::to_string)),
            is_default: Set(is_default),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
    }
}

impl CategoryLookup for CategoryRepository {
    async fn find_category(&self, id: CategoryId) -> Result<Option<CategoryRef>, RecurringError> {
        let model = categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        Ok(model.map(|m| CategoryRef {
            id: CategoryId::from_uuid(m.id),
            name: m.name,
        }))
    }
}
