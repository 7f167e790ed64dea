//! Expense repository for ledger reads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::recurring_expense::to_ledger_entry;
use crate::entities::expenses;
use outlay_core::budget::{BudgetError, LedgerStore};
use outlay_core::recurring::LedgerEntry;

/// Expense repository implementation.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Create a new expense repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists expenses dated within `[start, end]`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, sea_orm::DbErr> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::Date.gte(start))
            .filter(expenses::Column::Date.lte(end))
            .order_by_asc(expenses::Column::Date)
            .order_by_asc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(to_ledger_entry).collect())
    }
}

impl LedgerStore for ExpenseRepository {
    async fn sum_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Decimal>, BudgetError> {
        let total: Option<Option<Decimal>> = expenses::Entity::find()
            .select_only()
            .column_as(expenses::Column::Amount.sum(), "total")
            .filter(expenses::Column::Date.gte(start))
            .filter(expenses::Column::Date.lte(end))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::store(e.to_string()))?;

        Ok(total.flatten())
    }
}
