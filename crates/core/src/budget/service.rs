//! Budget service: current budget, limit changes and period status.

use std::sync::Arc;

use chrono::NaiveDate;
use outlay_shared::types::money::{has_cent_precision, to_money_scale};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::BudgetError;
use super::period::month_bounds;
use super::status::BudgetStatus;
use super::store::{BudgetStore, LedgerStore};
use super::types::BudgetDefinition;

/// Budget service for business logic.
pub struct BudgetService<B: BudgetStore, L: LedgerStore> {
    budgets: Arc<B>,
    ledger: Arc<L>,
}

impl<B: BudgetStore, L: LedgerStore> BudgetService<B, L> {
    /// Create a new budget service.
    #[must_use]
    pub fn new(budgets: Arc<B>, ledger: Arc<L>) -> Self {
        Self { budgets, ledger }
    }

    /// Validate a monthly limit.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidLimit` if the limit is not positive or has
    /// more than two decimal places.
    pub fn validate_limit(monthly_limit: Decimal) -> Result<(), BudgetError> {
        if monthly_limit <= Decimal::ZERO {
            return Err(BudgetError::InvalidLimit(
                "monthly limit must be greater than 0".to_string(),
            ));
        }
        if !has_cent_precision(monthly_limit) {
            return Err(BudgetError::InvalidLimit(
                "monthly limit must have at most 2 decimal places".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the current budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotConfigured` if no budget has been set.
    pub async fn current(&self) -> Result<BudgetDefinition, BudgetError> {
        self.budgets
            .find_current()
            .await?
            .ok_or(BudgetError::NotConfigured)
    }

    /// Sets the monthly limit, updating the current budget in place or
    /// creating the first one.
    ///
    /// # Errors
    ///
    /// Returns an error if the limit is invalid or the store fails.
    pub async fn set_limit(&self, monthly_limit: Decimal) -> Result<BudgetDefinition, BudgetError> {
        Self::validate_limit(monthly_limit)?;
        let monthly_limit = to_money_scale(monthly_limit);

        let budget = match self.budgets.find_current().await? {
            Some(current) => self.budgets.update_limit(current.id, monthly_limit).await?,
            None => self.budgets.create(monthly_limit).await?,
        };

        info!(budget_id = %budget.id, monthly_limit = %budget.monthly_limit, "Monthly budget set");
        Ok(budget)
    }

    /// Computes spending status for the calendar month containing `today`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotConfigured` if no budget has been set, or a
    /// store error.
    pub async fn status(&self, today: NaiveDate) -> Result<BudgetStatus, BudgetError> {
        let budget = self.current().await?;
        let (start, end) = month_bounds(today);
        let spent = self.ledger.sum_between(start, end).await?;

        let status = BudgetStatus::compute(budget.monthly_limit, spent);
        debug!(
            period_start = %start,
            period_end = %end,
            percentage_used = %status.percentage_used,
            status = %status.status,
            "Computed budget status"
        );
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;
    use outlay_shared::types::BudgetId;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::budget::types::BudgetHealth;

    #[derive(Default)]
    struct MockBudgets {
        budgets: Mutex<HashMap<BudgetId, BudgetDefinition>>,
    }

    impl BudgetStore for MockBudgets {
        async fn find_current(&self) -> Result<Option<BudgetDefinition>, BudgetError> {
            Ok(self
                .budgets
                .lock()
                .unwrap()
                .values()
                .max_by_key(|b| b.updated_at)
                .cloned())
        }

        async fn create(&self, monthly_limit: Decimal) -> Result<BudgetDefinition, BudgetError> {
            let now = Utc::now();
            let budget = BudgetDefinition {
                id: BudgetId::new(),
                monthly_limit,
                created_at: now,
                updated_at: now,
            };
            self.budgets
                .lock()
                .unwrap()
                .insert(budget.id, budget.clone());
            Ok(budget)
        }

        async fn update_limit(
            &self,
            id: BudgetId,
            monthly_limit: Decimal,
        ) -> Result<BudgetDefinition, BudgetError> {
            let mut budgets = self.budgets.lock().unwrap();
            let budget = budgets
                .get_mut(&id)
                .ok_or_else(|| BudgetError::store("budget vanished"))?;
            budget.monthly_limit = monthly_limit;
            budget.updated_at = Utc::now();
            Ok(budget.clone())
        }
    }

    /// Ledger returning sums over a fixed set of dated amounts.
    struct MockLedger {
        entries: Vec<(NaiveDate, Decimal)>,
    }

    impl LedgerStore for MockLedger {
        async fn sum_between(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Option<Decimal>, BudgetError> {
            let matching: Vec<_> = self
                .entries
                .iter()
                .filter(|(date, _)| *date >= start && *date <= end)
                .map(|(_, amount)| *amount)
                .collect();
            if matching.is_empty() {
                Ok(None)
            } else {
                Ok(Some(matching.into_iter().sum()))
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service(entries: Vec<(NaiveDate, Decimal)>) -> BudgetService<MockBudgets, MockLedger> {
        BudgetService::new(
            Arc::new(MockBudgets::default()),
            Arc::new(MockLedger { entries }),
        )
    }

    #[tokio::test]
    async fn test_status_without_budget_is_not_configured() {
        let svc = service(vec![]);
        assert_eq!(
            svc.status(date(2024, 1, 15)).await.unwrap_err(),
            BudgetError::NotConfigured
        );
        assert_eq!(svc.current().await.unwrap_err(), BudgetError::NotConfigured);
    }

    #[tokio::test]
    async fn test_set_limit_creates_then_updates_in_place() {
        let svc = service(vec![]);

        let first = svc.set_limit(dec!(1500)).await.unwrap();
        let second = svc.set_limit(dec!(2000.00)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.monthly_limit, dec!(2000.00));
        assert_eq!(svc.budgets.budgets.lock().unwrap().len(), 1);
        assert_eq!(svc.current().await.unwrap().monthly_limit, dec!(2000.00));
    }

    #[tokio::test]
    async fn test_set_limit_rejects_invalid_values() {
        let svc = service(vec![]);

        for bad in [dec!(0), dec!(-100.00), dec!(10.001)] {
            assert!(matches!(
                svc.set_limit(bad).await,
                Err(BudgetError::InvalidLimit(_))
            ));
        }
        assert!(svc.budgets.budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_only_counts_current_month() {
        let svc = service(vec![
            (date(2024, 1, 31), dec!(999.00)),
            (date(2024, 2, 1), dec!(1000.00)),
            (date(2024, 2, 29), dec!(800.00)),
            (date(2024, 3, 1), dec!(500.00)),
        ]);
        svc.set_limit(dec!(2000.00)).await.unwrap();

        let status = svc.status(date(2024, 2, 14)).await.unwrap();

        assert_eq!(status.total_spent, dec!(1800.00));
        assert_eq!(status.remaining, dec!(200.00));
        assert_eq!(status.percentage_used, dec!(90.00));
        assert_eq!(status.status, BudgetHealth::Warning);
    }

    #[tokio::test]
    async fn test_status_with_no_expenses_is_healthy() {
        let svc = service(vec![]);
        svc.set_limit(dec!(2000.00)).await.unwrap();

        let status = svc.status(date(2024, 6, 1)).await.unwrap();

        assert_eq!(status.total_spent, Decimal::ZERO);
        assert_eq!(status.status, BudgetHealth::Healthy);
    }
}
