//! Recurring expense error types.

use outlay_shared::types::{CategoryId, RecurringExpenseId};
use thiserror::Error;

/// Recurring expense errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurringError {
    /// Definition not found.
    #[error("Recurring expense not found: {0}")]
    NotFound(RecurringExpenseId),

    /// Referenced category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Input rejected by validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The stored definition changed after it was read.
    #[error("Recurring expense {0} was modified concurrently")]
    ConcurrentModification(RecurringExpenseId),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl RecurringError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<RecurringError> for outlay_shared::AppError {
    fn from(err: RecurringError) -> Self {
        match err {
            RecurringError::NotFound(_) | RecurringError::CategoryNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            RecurringError::InvalidInput(msg) => Self::Validation(msg),
            RecurringError::ConcurrentModification(_) => Self::Conflict(err.to_string()),
            RecurringError::Store(msg) => Self::Database(msg),
        }
    }
}
