//! Materialization pass over due recurring expenses.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::error::RecurringError;
use super::store::RecurringExpenseStore;
use super::types::{ProcessingReport, RecurringExpense};

/// What happened to a single due definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// A ledger entry was created and the schedule advanced.
    Created,
    /// The end date had passed, so the definition was deactivated.
    Expired,
}

/// Turns due recurrence definitions into ledger entries.
///
/// Each call to [`run`](Self::run) is one pass: every due definition moves
/// forward by exactly one step. Passes on the same processor never overlap.
pub struct RecurringExpenseProcessor<R: RecurringExpenseStore> {
    store: Arc<R>,
    run_lock: Mutex<()>,
}

impl<R: RecurringExpenseStore> RecurringExpenseProcessor<R> {
    /// Create a new processor.
    #[must_use]
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            run_lock: Mutex::new(()),
        }
    }

    /// Processes every active definition due on or before `reference_date`.
    ///
    /// Failures on individual definitions are logged and counted in the
    /// report without stopping the pass.
    ///
    /// # Errors
    ///
    /// Returns an error only if the due definitions cannot be loaded.
    pub async fn run(&self, reference_date: NaiveDate) -> Result<ProcessingReport, RecurringError> {
        let _guard = self.run_lock.lock().await;

        let due = self.store.find_due_active(reference_date).await?;
        let mut report = ProcessingReport::for_date(reference_date);
        report.due = due.len();

        debug!(reference_date = %reference_date, due = due.len(), "Processing recurring expenses");

        for expense in &due {
            match self.process_one(expense, reference_date).await {
                Ok(Outcome::Created) => report.created += 1,
                Ok(Outcome::Expired) => report.deactivated += 1,
                Err(e) => {
                    warn!(
                        recurring_id = %expense.id,
                        error = %e,
                        "Failed to process recurring expense"
                    );
                    report.record_failure(expense.id, e.to_string());
                }
            }
        }

        info!(
            reference_date = %reference_date,
            due = report.due,
            created = report.created,
            deactivated = report.deactivated,
            failed = report.failed,
            "Recurring expense pass finished"
        );

        Ok(report)
    }

    /// Repeats [`run`](Self::run) until nothing is due, a pass makes no
    /// progress, or `max_passes` passes have run.
    ///
    /// Use this to clear a backlog of missed periods; each pass still
    /// advances a definition by a single step.
    ///
    /// # Errors
    ///
    /// Returns the first pass-level error.
    pub async fn run_until_caught_up(
        &self,
        reference_date: NaiveDate,
        max_passes: usize,
    ) -> Result<ProcessingReport, RecurringError> {
        let mut total = ProcessingReport::for_date(reference_date);

        for pass in 1..=max_passes {
            let report = self.run(reference_date).await?;
            let progressed = report.created + report.deactivated > 0;
            let idle = report.is_idle();
            total.absorb(report);

            if idle || !progressed {
                debug!(passes = pass, "Recurring expenses caught up");
                break;
            }
        }

        Ok(total)
    }

    async fn process_one(
        &self,
        expense: &RecurringExpense,
        reference_date: NaiveDate,
    ) -> Result<Outcome, RecurringError> {
        if expense.is_expired(reference_date) {
            // Refused by the store if the definition changed since the due query.
            self.store.save(&expense.retired()).await?;
            info!(recurring_id = %expense.id, "Recurring expense expired and was deactivated");
            return Ok(Outcome::Expired);
        }

        let advanced = expense.advanced();
        let entry = self
            .store
            .record_occurrence(expense.occurrence_entry(), &advanced, expense.next_occurrence)
            .await?;

        debug!(
            recurring_id = %expense.id,
            expense_id = %entry.id,
            date = %entry.date,
            next_occurrence = %advanced.next_occurrence,
            "Created expense from recurring definition"
        );

        Ok(Outcome::Created)
    }
}
