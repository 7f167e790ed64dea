//! Recurring expense repository for database operations.
//!
//! Implements the core `RecurringExpenseStore` contract using SeaORM.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};
use tracing::debug;

use crate::entities::{categories, expenses, recurring_expenses};
use outlay_core::recurring::{
    Frequency, LedgerEntry, NewLedgerEntry, NewRecurringExpense, RecurringError,
    RecurringExpense, RecurringExpenseStore,
};
use outlay_shared::types::{CategoryId, ExpenseId, RecurringExpenseId};

/// Recurring expense repository implementation.
#[derive(Debug, Clone)]
pub struct RecurringExpenseRepository {
    db: DatabaseConnection,
}

impl RecurringExpenseRepository {
    /// Create a new recurring expense repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a definition together with its category name.
    async fn load(
        &self,
        id: RecurringExpenseId,
    ) -> Result<Option<RecurringExpense>, RecurringError> {
        let row = recurring_expenses::Entity::find_by_id(id.into_inner())
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        row.map(|(model, category)| to_domain(model, category.map(|c| c.name)))
            .transpose()
    }
}

impl RecurringExpenseStore for RecurringExpenseRepository {
    async fn find_due_active(
        &self,
        reference_date: NaiveDate,
    ) -> Result<Vec<RecurringExpense>, RecurringError> {
        let rows = recurring_expenses::Entity::find()
            .filter(recurring_expenses::Column::Active.eq(true))
            .filter(recurring_expenses::Column::NextOccurrence.lte(reference_date))
            .order_by_asc(recurring_expenses::Column::NextOccurrence)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        rows.into_iter()
            .map(|(model, category)| to_domain(model, category.map(|c| c.name)))
            .collect()
    }

    async fn save(&self, expense: &RecurringExpense) -> Result<RecurringExpense, RecurringError> {
        let fields = recurring_expenses::ActiveModel {
            id: NotSet,
            amount: Set(expense.amount),
            category_id: Set(expense.category_id.into_inner()),
            description: Set(expense.description.clone()),
            frequency: Set(expense.frequency.as_str().to_string()),
            start_date: Set(expense.start_date),
            end_date: Set(expense.end_date),
            next_occurrence: Set(expense.next_occurrence),
            active: Set(expense.active),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        // Only overwrite the version we read.
        let result = recurring_expenses::Entity::update_many()
            .set(fields.clone())
            .filter(recurring_expenses::Column::Id.eq(expense.id.into_inner()))
            .filter(
                recurring_expenses::Column::UpdatedAt
                    .eq(DateTime::<FixedOffset>::from(expense.updated_at)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        if result.rows_affected == 0 {
            let exists = recurring_expenses::Entity::find_by_id(expense.id.into_inner())
                .one(&self.db)
                .await
                .map_err(|e| RecurringError::store(e.to_string()))?
                .is_some();
            if exists {
                debug!(recurring_id = %expense.id, "Definition changed since it was read");
                return Err(RecurringError::ConcurrentModification(expense.id));
            }

            recurring_expenses::ActiveModel {
                id: Set(expense.id.into_inner()),
                created_at: Set(expense.created_at.into()),
                ..fields
            }
            .insert(&self.db)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;
        }

        self.load(expense.id)
            .await?
            .ok_or(RecurringError::NotFound(expense.id))
    }

    async fn record_occurrence(
        &self,
        entry: NewLedgerEntry,
        advanced: &RecurringExpense,
        observed_next: NaiveDate,
    ) -> Result<LedgerEntry, RecurringError> {
        let now = Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        // Only advance the schedule we actually observed.
        let result = recurring_expenses::Entity::update_many()
            .col_expr(
                recurring_expenses::Column::NextOccurrence,
                Expr::value(advanced.next_occurrence),
            )
            .col_expr(
                recurring_expenses::Column::UpdatedAt,
                Expr::value(DateTime::<FixedOffset>::from(now)),
            )
            .filter(recurring_expenses::Column::Id.eq(advanced.id.into_inner()))
            .filter(recurring_expenses::Column::NextOccurrence.eq(observed_next))
            .filter(recurring_expenses::Column::Active.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back.
            debug!(recurring_id = %advanced.id, "Schedule changed before advance, skipping");
            return Err(RecurringError::ConcurrentModification(advanced.id));
        }

        let model = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            amount: Set(entry.amount),
            category_id: Set(entry.category_id.into_inner()),
            date: Set(entry.date),
            description: Set(entry.description),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(|e| RecurringError::store(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        Ok(to_ledger_entry(model))
    }

    async fn find_by_id(
        &self,
        id: RecurringExpenseId,
    ) -> Result<Option<RecurringExpense>, RecurringError> {
        self.load(id).await
    }

    async fn list(&self, active_only: bool) -> Result<Vec<RecurringExpense>, RecurringError> {
        let mut query = recurring_expenses::Entity::find();
        if active_only {
            query = query.filter(recurring_expenses::Column::Active.eq(true));
        }

        let rows = query
            .order_by_asc(recurring_expenses::Column::NextOccurrence)
            .order_by_asc(recurring_expenses::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        rows.into_iter()
            .map(|(model, category)| to_domain(model, category.map(|c| c.name)))
            .collect()
    }

    async fn insert(
        &self,
        expense: NewRecurringExpense,
    ) -> Result<RecurringExpense, RecurringError> {
        let now = Utc::now();
        let model = recurring_expenses::ActiveModel {
            id: Set(RecurringExpenseId::new().into_inner()),
            amount: Set(expense.amount),
            category_id: Set(expense.category.id.into_inner()),
            description: Set(expense.description),
            frequency: Set(expense.frequency.as_str().to_string()),
            start_date: Set(expense.start_date),
            end_date: Set(expense.end_date),
            next_occurrence: Set(expense.next_occurrence),
            active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| RecurringError::store(e.to_string()))?;

        to_domain(model, Some(expense.category.name))
    }

    async fn delete(&self, id: RecurringExpenseId) -> Result<bool, RecurringError> {
        let result = recurring_expenses::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| RecurringError::store(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert database model to domain model.
fn to_domain(
    model: recurring_expenses::Model,
    category_name: Option<String>,
) -> Result<RecurringExpense, RecurringError> {
    let frequency: Frequency = model
        .frequency
        .parse()
        .map_err(|e: String| RecurringError::store(e))?;

    Ok(RecurringExpense {
        id: RecurringExpenseId::from_uuid(model.id),
        amount: model.amount,
        category_id: CategoryId::from_uuid(model.category_id),
        category_name,
        description: model.description,
        frequency,
        start_date: model.start_date,
        end_date: model.end_date,
        next_occurrence: model.next_occurrence,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

/// Convert an expense row to a ledger entry.
pub(crate) fn to_ledger_entry(model: expenses::Model) -> LedgerEntry {
    LedgerEntry {
        id: ExpenseId::from_uuid(model.id),
        amount: model.amount,
        category_id: CategoryId::from_uuid(model.category_id),
        date: model.date,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
