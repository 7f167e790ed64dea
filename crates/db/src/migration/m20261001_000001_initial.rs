//! Initial database migration.
//!
//! Creates the expense tracking tables: categories, expenses, recurring
//! expense definitions and budgets.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;
        db.execute_unprepared(RECURRING_EXPENSES_SQL).await?;
        db.execute_unprepared(BUDGETS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    description VARCHAR(500),
    is_default BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY,
    amount NUMERIC(12, 2) NOT NULL,
    category_id UUID NOT NULL REFERENCES categories(id),
    date DATE NOT NULL,
    description VARCHAR(520) NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expenses_amount_positive CHECK (amount > 0)
);

-- Monthly spend sums scan by date
CREATE INDEX idx_expenses_date ON expenses(date);
CREATE INDEX idx_expenses_category ON expenses(category_id);
";

const RECURRING_EXPENSES_SQL: &str = r"
CREATE TABLE recurring_expenses (
    id UUID PRIMARY KEY,
    amount NUMERIC(12, 2) NOT NULL,
    category_id UUID NOT NULL REFERENCES categories(id),
    description VARCHAR(500),
    frequency VARCHAR(16) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE,
    next_occurrence DATE NOT NULL,
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_recurring_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_recurring_frequency CHECK (
        frequency IN ('DAILY', 'WEEKLY', 'BIWEEKLY', 'MONTHLY', 'QUARTERLY', 'YEARLY')
    ),
    CONSTRAINT chk_recurring_window CHECK (end_date IS NULL OR end_date >= start_date),
    CONSTRAINT chk_recurring_next_after_start CHECK (next_occurrence >= start_date)
);

-- Due query: active AND next_occurrence <= reference date
CREATE INDEX idx_recurring_due ON recurring_expenses(active, next_occurrence);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY,
    monthly_limit NUMERIC(12, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_budgets_limit_positive CHECK (monthly_limit > 0)
);

-- Current budget is the most recently updated row
CREATE INDEX idx_budgets_updated ON budgets(updated_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS recurring_expenses CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
";
