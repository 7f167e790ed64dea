//! Budget repository for budget database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::budgets;
use outlay_core::budget::{BudgetDefinition, BudgetError, BudgetStore};
use outlay_shared::types::BudgetId;

/// Budget repository implementation.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Create a new budget repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl BudgetStore for BudgetRepository {
    async fn find_current(&self) -> Result<Option<BudgetDefinition>, BudgetError> {
        let model = budgets::Entity::find()
            .order_by_desc(budgets::Column::UpdatedAt)
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::store(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn create(&self, monthly_limit: Decimal) -> Result<BudgetDefinition, BudgetError> {
        let now = Utc::now();
        let model = budgets::ActiveModel {
            id: Set(BudgetId::new().into_inner()),
            monthly_limit: Set(monthly_limit),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| BudgetError::store(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn update_limit(
        &self,
        id: BudgetId,
        monthly_limit: Decimal,
    ) -> Result<BudgetDefinition, BudgetError> {
        let model = budgets::ActiveModel {
            id: Set(id.into_inner()),
            monthly_limit: Set(monthly_limit),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| BudgetError::store(e.to_string()))?;

        Ok(to_domain(model))
    }
}

/// Convert database model to domain model.
fn to_domain(model: budgets::Model) -> BudgetDefinition {
    BudgetDefinition {
        id: BudgetId::from_uuid(model.id),
        monthly_limit: model.monthly_limit,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
