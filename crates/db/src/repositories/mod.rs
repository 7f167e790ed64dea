//! Repository abstractions for data access.
//!
//! Repositories implement the store traits declared in `outlay-core`,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod budget;
pub mod category;
pub mod expense;
pub mod recurring_expense;

pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use expense::ExpenseRepository;
pub use recurring_expense::RecurringExpenseRepository;
