//! Spend-vs-limit aggregation.

use outlay_shared::types::money::{round_half_up, to_money_scale};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::BudgetHealth;

/// Percentage at which spending is over budget.
pub const OVER_BUDGET_THRESHOLD: Decimal = dec!(100);

/// Percentage at which spending triggers a warning.
pub const WARNING_THRESHOLD: Decimal = dec!(80);

/// Fractional digits kept on the spent/limit ratio before scaling to percent.
const RATIO_SCALE: u32 = 4;

/// Spending status for a budget period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Monthly limit.
    pub monthly_limit: Decimal,
    /// Amount spent in the period.
    pub total_spent: Decimal,
    /// `monthly_limit - total_spent`; negative when over budget.
    pub remaining: Decimal,
    /// Share of the limit spent, as a percentage with two decimals.
    pub percentage_used: Decimal,
    /// Health classification.
    pub status: BudgetHealth,
}

impl BudgetStatus {
    /// Aggregates period spending against a limit.
    ///
    /// A missing spend total counts as zero. A non-positive limit yields a
    /// zero percentage.
    #[must_use]
    pub fn compute(monthly_limit: Decimal, period_spent: Option<Decimal>) -> Self {
        let total_spent = period_spent.unwrap_or(Decimal::ZERO);
        let percentage_used = percentage_used(monthly_limit, total_spent);

        Self {
            monthly_limit: to_money_scale(monthly_limit),
            total_spent: to_money_scale(total_spent),
            remaining: to_money_scale(monthly_limit.saturating_sub(total_spent)),
            percentage_used,
            status: classify(percentage_used),
        }
    }
}

/// Computes `spent / limit * 100`.
///
/// The ratio is rounded half-up to four digits first, then the percentage is
/// rounded half-up to two digits.
#[must_use]
pub fn percentage_used(monthly_limit: Decimal, total_spent: Decimal) -> Decimal {
    if monthly_limit <= Decimal::ZERO {
        return to_money_scale(Decimal::ZERO);
    }

    let ratio = total_spent
        .checked_div(monthly_limit)
        .unwrap_or(Decimal::MAX);
    let ratio = round_half_up(ratio, RATIO_SCALE);
    to_money_scale(ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Maps a percentage to its health tier.
#[must_use]
pub fn classify(percentage_used: Decimal) -> BudgetHealth {
    if percentage_used >= OVER_BUDGET_THRESHOLD {
        BudgetHealth::OverBudget
    } else if percentage_used >= WARNING_THRESHOLD {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Healthy
    }
}
