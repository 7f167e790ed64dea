//! Persistence contracts consumed by the budget service.

use chrono::NaiveDate;
use outlay_shared::types::BudgetId;
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::BudgetDefinition;

/// Repository trait for budget definitions.
pub trait BudgetStore: Send + Sync {
    /// Returns the most recently updated budget, if any.
    fn find_current(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<BudgetDefinition>, BudgetError>> + Send;

    /// Creates a budget definition.
    fn create(
        &self,
        monthly_limit: Decimal,
    ) -> impl std::future::Future<Output = Result<BudgetDefinition, BudgetError>> + Send;

    /// Replaces the limit of an existing budget and bumps its update time.
    fn update_limit(
        &self,
        id: BudgetId,
        monthly_limit: Decimal,
    ) -> impl std::future::Future<Output = Result<BudgetDefinition, BudgetError>> + Send;
}

/// Read access to recorded expenses.
pub trait LedgerStore: Send + Sync {
    /// Sums expense amounts dated within `[start, end]`. `None` when no rows match.
    fn sum_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Option<Decimal>, BudgetError>> + Send;
}
