//! Recurring expense scheduling.
//!
//! A recurrence definition describes a repeating charge. Each processing pass
//! turns every due definition into one ledger entry and moves its schedule
//! forward by one step, retiring definitions whose end date has passed.

pub mod error;
pub mod frequency;
pub mod processor;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod types;

pub use error::RecurringError;
pub use frequency::Frequency;
pub use processor::RecurringExpenseProcessor;
pub use scheduler::{DailySchedule, spawn_daily};
pub use service::RecurringExpenseService;
pub use store::{CategoryLookup, RecurringExpenseStore};
pub use types::{
    CategoryRef, LedgerEntry, NewLedgerEntry, NewRecurringExpense, ProcessingFailure,
    ProcessingReport, RecurringExpense, RecurringExpenseInput,
};
