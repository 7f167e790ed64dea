//! Budget error types.

use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// No budget definition exists yet.
    #[error("No budget has been set")]
    NotConfigured,

    /// Monthly limit rejected by validation.
    #[error("Invalid monthly limit: {0}")]
    InvalidLimit(String),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl BudgetError {
    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<BudgetError> for outlay_shared::AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotConfigured => Self::NotFound(err.to_string()),
            BudgetError::InvalidLimit(_) => Self::Validation(err.to_string()),
            BudgetError::Store(msg) => Self::Database(msg),
        }
    }
}
