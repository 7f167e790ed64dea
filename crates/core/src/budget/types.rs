//! Budget types.

use chrono::{DateTime, Utc};
use outlay_shared::types::BudgetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monthly spending limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDefinition {
    /// Budget ID.
    pub id: BudgetId,
    /// Monthly limit.
    pub monthly_limit: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp. The most recent one marks the current budget.
    pub updated_at: DateTime<Utc>,
}

/// Three-tier health classification of period spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetHealth {
    /// Below the warning threshold.
    Healthy,
    /// At or above 80% of the limit.
    Warning,
    /// At or above 100% of the limit.
    OverBudget,
}

impl BudgetHealth {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Warning => "WARNING",
            Self::OverBudget => "OVER_BUDGET",
        }
    }
}

impl std::fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
