//! Monthly budget and spending status.

pub mod error;
pub mod period;
pub mod service;
pub mod status;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use period::month_bounds;
pub use service::BudgetService;
pub use status::BudgetStatus;
pub use store::{BudgetStore, LedgerStore};
pub use types::{BudgetDefinition, BudgetHealth};
