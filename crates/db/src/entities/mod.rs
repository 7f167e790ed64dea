//! `SeaORM` entity definitions.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod recurring_expenses;
