//! Recurring expense data types.

use chrono::{DateTime, NaiveDate, Utc};
use outlay_shared::types::{CategoryId, ExpenseId, RecurringExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;

/// Suffix appended to the description of every materialized occurrence.
pub const RECURRING_MARKER: &str = "(Recurring)";

/// A recurrence definition: a template for a repeating charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    /// Definition ID.
    pub id: RecurringExpenseId,
    /// Amount charged per occurrence.
    pub amount: Decimal,
    /// Category the charge is booked against.
    pub category_id: CategoryId,
    /// Category name snapshot for display.
    pub category_name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Repeat frequency.
    pub frequency: Frequency,
    /// First scheduled occurrence.
    pub start_date: NaiveDate,
    /// Last date on which an occurrence may fall (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Next occurrence to materialize.
    pub next_occurrence: NaiveDate,
    /// Whether the definition is processed.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RecurringExpense {
    /// Returns true if `reference_date` lies after the end date.
    #[must_use]
    pub fn is_expired(&self, reference_date: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| reference_date > end)
    }

    /// Builds the ledger entry for the current `next_occurrence`.
    #[must_use]
    pub fn occurrence_entry(&self) -> NewLedgerEntry {
        let description = match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => format!("{text} {RECURRING_MARKER}"),
            _ => RECURRING_MARKER.to_string(),
        };

        NewLedgerEntry {
            amount: self.amount,
            category_id: self.category_id,
            date: self.next_occurrence,
            description,
        }
    }

    /// Returns a copy moved forward by one recurrence step.
    ///
    /// Only `next_occurrence` changes. Deactivation happens on a later pass,
    /// once the reference date is past the end date.
    #[must_use]
    pub fn advanced(&self) -> Self {
        Self {
            next_occurrence: self.frequency.next_date(self.next_occurrence),
            ..self.clone()
        }
    }

    /// Returns a deactivated copy with the schedule left untouched.
    #[must_use]
    pub fn retired(&self) -> Self {
        Self {
            active: false,
            ..self.clone()
        }
    }
}

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry ID.
    pub id: ExpenseId,
    /// Amount.
    pub amount: Decimal,
    /// Category.
    pub category_id: CategoryId,
    /// Date the expense falls on.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A ledger entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLedgerEntry {
    /// Amount.
    pub amount: Decimal,
    /// Category.
    pub category_id: CategoryId,
    /// Date the expense falls on.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
}

/// Category reference resolved by the administrative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

/// Input for creating or replacing a recurring expense definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringExpenseInput {
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Category.
    pub category_id: CategoryId,
    /// Optional description.
    pub description: Option<String>,
    /// Repeat frequency.
    pub frequency: Frequency,
    /// First occurrence.
    pub start_date: NaiveDate,
    /// Optional inclusive end date.
    pub end_date: Option<NaiveDate>,
}

/// A validated definition ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecurringExpense {
    /// Amount per occurrence.
    pub amount: Decimal,
    /// Category.
    pub category: CategoryRef,
    /// Optional description.
    pub description: Option<String>,
    /// Repeat frequency.
    pub frequency: Frequency,
    /// First occurrence.
    pub start_date: NaiveDate,
    /// Optional inclusive end date.
    pub end_date: Option<NaiveDate>,
    /// Initial next occurrence (always the start date).
    pub next_occurrence: NaiveDate,
}

/// A definition that could not be processed during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingFailure {
    /// Definition ID.
    pub recurring_expense_id: RecurringExpenseId,
    /// Error message.
    pub message: String,
}

/// Outcome of one processing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingReport {
    /// Reference date the pass ran for.
    pub reference_date: Option<NaiveDate>,
    /// Number of due definitions returned by the store.
    pub due: usize,
    /// Ledger entries created.
    pub created: usize,
    /// Definitions deactivated.
    pub deactivated: usize,
    /// Definitions that failed.
    pub failed: usize,
    /// Failure details, one per failed definition.
    pub failures: Vec<ProcessingFailure>,
}

impl ProcessingReport {
    /// Creates an empty report for a reference date.
    #[must_use]
    pub fn for_date(reference_date: NaiveDate) -> Self {
        Self {
            reference_date: Some(reference_date),
            ..Self::default()
        }
    }

    /// Returns true if nothing was due.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.due == 0
    }

    /// Records a failed definition.
    pub fn record_failure(&mut self, recurring_expense_id: RecurringExpenseId, message: String) {
        self.failed += 1;
        self.failures.push(ProcessingFailure {
            recurring_expense_id,
            message,
        });
    }

    /// Folds another pass into this report.
    pub fn absorb(&mut self, other: Self) {
        self.due += other.due;
        self.created += other.created;
        self.deactivated += other.deactivated;
        self.failed += other.failed;
        self.failures.extend(other.failures);
    }
}
