//! Administrative operations on recurring expense definitions.

use std::sync::Arc;

use outlay_shared::types::RecurringExpenseId;
use outlay_shared::types::money::{has_cent_precision, to_money_scale};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::RecurringError;
use super::store::{CategoryLookup, RecurringExpenseStore};
use super::types::{NewRecurringExpense, RecurringExpense, RecurringExpenseInput};

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Attempts for an administrative write whose snapshot went stale.
const MAX_WRITE_ATTEMPTS: usize = 3;

/// Service for creating and managing recurring expense definitions.
pub struct RecurringExpenseService<S: RecurringExpenseStore, C: CategoryLookup> {
    store: Arc<S>,
    categories: Arc<C>,
}

impl<S: RecurringExpenseStore, C: CategoryLookup> RecurringExpenseService<S, C> {
    /// Create a new service.
    #[must_use]
    pub fn new(store: Arc<S>, categories: Arc<C>) -> Self {
        Self { store, categories }
    }

    /// Validates input fields.
    ///
    /// # Errors
    ///
    /// Returns `RecurringError::InvalidInput` if the amount is not positive or
    /// has sub-cent digits, the end date precedes the start date, or the
    /// description is too long.
    pub fn validate(input: &RecurringExpenseInput) -> Result<(), RecurringError> {
        if input.amount <= Decimal::ZERO {
            return Err(RecurringError::invalid("Amount must be greater than 0"));
        }
        if !has_cent_precision(input.amount) {
            return Err(RecurringError::invalid(
                "Amount must have at most 2 decimal places",
            ));
        }
        if let Some(end) = input.end_date
            && end < input.start_date
        {
            return Err(RecurringError::invalid(
                "End date must not be before start date",
            ));
        }
        if let Some(description) = &input.description
            && description.chars().count() > MAX_DESCRIPTION_LEN
        {
            return Err(RecurringError::invalid(format!(
                "Description must not exceed {MAX_DESCRIPTION_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Creates a new active definition whose first occurrence is its start date.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the category does not exist, or
    /// the store fails.
    pub async fn create(
        &self,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense, RecurringError> {
        Self::validate(&input)?;

        let category = self
            .categories
            .find_category(input.category_id)
            .await?
            .ok_or(RecurringError::CategoryNotFound(input.category_id))?;

        let created = self
            .store
            .insert(NewRecurringExpense {
                amount: to_money_scale(input.amount),
                category,
                description: normalize_description(input.description),
                frequency: input.frequency,
                start_date: input.start_date,
                end_date: input.end_date,
                next_occurrence: input.start_date,
            })
            .await?;

        info!(
            recurring_id = %created.id,
            frequency = %created.frequency,
            "Recurring expense created"
        );
        Ok(created)
    }

    /// Replaces the editable fields of a definition.
    ///
    /// The pending occurrence is kept unless it now falls before the new start
    /// date, in which case the schedule restarts at the start date. If a
    /// processing pass advances the definition while the update is in flight,
    /// the fields are reapplied on top of the advanced schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the definition or category does
    /// not exist, or the store fails.
    pub async fn update(
        &self,
        id: RecurringExpenseId,
        input: RecurringExpenseInput,
    ) -> Result<RecurringExpense, RecurringError> {
        Self::validate(&input)?;

        let existing = self.get(id).await?;
        let category = self
            .categories
            .find_category(input.category_id)
            .await?
            .ok_or(RecurringError::CategoryNotFound(input.category_id))?;

        let amount = to_money_scale(input.amount);
        let description = normalize_description(input.description);
        let saved = self
            .save_fresh(existing, move |current| RecurringExpense {
                amount,
                category_id: category.id,
                category_name: Some(category.name.clone()),
                description: description.clone(),
                frequency: input.frequency,
                start_date: input.start_date,
                end_date: input.end_date,
                next_occurrence: current.next_occurrence.max(input.start_date),
                ..current
            })
            .await?;
        info!(recurring_id = %id, "Recurring expense updated");
        Ok(saved)
    }

    /// Activates or deactivates a definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition does not exist or the store fails.
    pub async fn toggle(
        &self,
        id: RecurringExpenseId,
        active: bool,
    ) -> Result<RecurringExpense, RecurringError> {
        let existing = self.get(id).await?;
        let saved = self
            .save_fresh(existing, move |current| RecurringExpense { active, ..current })
            .await?;
        info!(recurring_id = %id, active, "Recurring expense toggled");
        Ok(saved)
    }

    /// Deletes a definition. Ledger entries already created are kept.
    ///
    /// # Errors
    ///
    /// Returns `RecurringError::NotFound` if the definition does not exist.
    pub async fn delete(&self, id: RecurringExpenseId) -> Result<(), RecurringError> {
        if !self.store.delete(id).await? {
            return Err(RecurringError::NotFound(id));
        }
        info!(recurring_id = %id, "Recurring expense deleted");
        Ok(())
    }

    /// Fetches a definition by ID.
    ///
    /// # Errors
    ///
    /// Returns `RecurringError::NotFound` if the definition does not exist.
    pub async fn get(&self, id: RecurringExpenseId) -> Result<RecurringExpense, RecurringError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(RecurringError::NotFound(id))
    }

    /// Lists all definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list(&self) -> Result<Vec<RecurringExpense>, RecurringError> {
        self.store.list(false).await
    }

    /// Lists active definitions only.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_active(&self) -> Result<Vec<RecurringExpense>, RecurringError> {
        self.store.list(true).await
    }

    /// Saves `apply(current)`, re-reading and reapplying when the store
    /// reports that `current` went stale.
    async fn save_fresh<F>(
        &self,
        mut current: RecurringExpense,
        apply: F,
    ) -> Result<RecurringExpense, RecurringError>
    where
        F: Fn(RecurringExpense) -> RecurringExpense + Send + Sync,
    {
        let id = current.id;
        let mut attempt = 1;
        loop {
            match self.store.save(&apply(current)).await {
                Err(RecurringError::ConcurrentModification(_)) if attempt < MAX_WRITE_ATTEMPTS => {
                    debug!(recurring_id = %id, attempt, "Definition changed during write, retrying");
                    attempt += 1;
                    current = self.get(id).await?;
                }
                result => return result,
            }
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
