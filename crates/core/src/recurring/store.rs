//! Persistence contracts consumed by the recurring expense engine.
//!
//! These traits are implemented by the db crate.

use chrono::NaiveDate;
use outlay_shared::types::{CategoryId, RecurringExpenseId};

use super::error::RecurringError;
use super::types::{CategoryRef, LedgerEntry, NewLedgerEntry, NewRecurringExpense, RecurringExpense};

/// Repository trait for recurrence definitions.
pub trait RecurringExpenseStore: Send + Sync {
    /// Returns every active definition whose next occurrence is on or before `reference_date`.
    fn find_due_active(
        &self,
        reference_date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<RecurringExpense>, RecurringError>> + Send;

    /// Persists the definition, preserving its ID.
    ///
    /// An existing definition is only overwritten while its stored
    /// `updated_at` still equals `expense.updated_at`. Otherwise nothing is
    /// written and `RecurringError::ConcurrentModification` is returned.
    fn save(
        &self,
        expense: &RecurringExpense,
    ) -> impl std::future::Future<Output = Result<RecurringExpense, RecurringError>> + Send;

    /// Inserts a ledger entry and moves `next_occurrence` to the advanced date in
    /// one unit of work.
    ///
    /// The advance only applies while the stored definition is still active and
    /// its next occurrence equals `observed_next`. Otherwise nothing is written
    /// and `RecurringError::ConcurrentModification` is returned.
    fn record_occurrence(
        &self,
        entry: NewLedgerEntry,
        advanced: &RecurringExpense,
        observed_next: NaiveDate,
    ) -> impl std::future::Future<Output = Result<LedgerEntry, RecurringError>> + Send;

    /// Find a definition by ID.
    fn find_by_id(
        &self,
        id: RecurringExpenseId,
    ) -> impl std::future::Future<Output = Result<Option<RecurringExpense>, RecurringError>> + Send;

    /// List definitions, optionally only the active ones.
    fn list(
        &self,
        active_only: bool,
    ) -> impl std::future::Future<Output = Result<Vec<RecurringExpense>, RecurringError>> + Send;

    /// Insert a new definition.
    fn insert(
        &self,
        expense: NewRecurringExpense,
    ) -> impl std::future::Future<Output = Result<RecurringExpense, RecurringError>> + Send;

    /// Delete a definition. Returns false if it did not exist.
    fn delete(
        &self,
        id: RecurringExpenseId,
    ) -> impl std::future::Future<Output = Result<bool, RecurringError>> + Send;
}

/// Category lookup used by the administrative path.
pub trait CategoryLookup: Send + Sync {
    /// Resolve a category by ID.
    fn find_category(
        &self,
        id: CategoryId,
    ) -> impl std::future::Future<Output = Result<Option<CategoryRef>, RecurringError>> + Send;
}
