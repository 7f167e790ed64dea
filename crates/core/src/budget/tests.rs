//! Property-based tests for budget status.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::status::{BudgetStatus, classify};
use super::types::BudgetHealth;

/// Amounts in cents up to ten million.
fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000).prop_map(|c| Decimal::new(c, 2))
}

proptest! {
    /// remaining is always limit - spent, whatever the sign.
    #[test]
    fn test_remaining_is_limit_minus_spent(limit in cents(), spent in cents()) {
        let status = BudgetStatus::compute(limit, Some(spent));
        prop_assert_eq!(status.remaining, limit - spent);
        prop_assert_eq!(status.remaining.scale(), 2);
    }

    /// percentage_used always carries exactly two decimal places.
    #[test]
    fn test_percentage_has_two_decimals(limit in cents(), spent in cents()) {
        let status = BudgetStatus::compute(limit, Some(spent));
        prop_assert_eq!(status.percentage_used.scale(), 2);
        prop_assert!(status.percentage_used >= Decimal::ZERO);
    }

    /// Spending more never improves the health tier.
    #[test]
    fn test_status_is_monotonic_in_spend(
        limit in 1i64..1_000_000_000,
        spent in cents(),
        extra in cents(),
    ) {
        let limit = Decimal::new(limit, 2);
        let rank = |h: BudgetHealth| match h {
            BudgetHealth::Healthy => 0,
            BudgetHealth::Warning => 1,
            BudgetHealth::OverBudget => 2,
        };
        let before = BudgetStatus::compute(limit, Some(spent));
        let after = BudgetStatus::compute(limit, Some(spent + extra));
        prop_assert!(after.percentage_used >= before.percentage_used);
        prop_assert!(rank(after.status) >= rank(before.status));
    }

    /// Missing spend behaves exactly like zero spend.
    #[test]
    fn test_missing_spend_equals_zero(limit in cents()) {
        prop_assert_eq!(
            BudgetStatus::compute(limit, None),
            BudgetStatus::compute(limit, Some(Decimal::ZERO))
        );
    }

    /// Tiers follow the thresholds.
    #[test]
    fn test_classify_matches_thresholds(pct in 0i64..20_000) {
        let pct = Decimal::new(pct, 2);
        let expected = if pct >= dec!(100) {
            BudgetHealth::OverBudget
        } else if pct >= dec!(80) {
            BudgetHealth::Warning
        } else {
            BudgetHealth::Healthy
        };
        prop_assert_eq!(classify(pct), expected);
    }
}
