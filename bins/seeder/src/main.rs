//! Database seeder for Outlay development and testing.
//!
//! Seeds the default expense categories, a sample monthly budget and a sample
//! recurring expense. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::{Datelike, Local};
use outlay_core::budget::{BudgetService, BudgetStore};
use outlay_core::recurring::{
    Frequency, RecurringExpenseInput, RecurringExpenseService, RecurringExpenseStore,
};
use outlay_db::{BudgetRepository, CategoryRepository, ExpenseRepository, RecurringExpenseRepository};
use outlay_shared::types::CategoryId;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

/// Default categories: (name, description).
const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Groceries", "Food and household items"),
    ("Transportation", "Gas, public transit, car maintenance"),
    ("Entertainment", "Movies, games, hobbies"),
    ("Utilities", "Electricity, water, internet, etc."),
    ("Other", "Miscellaneous expenses"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    println!("Connecting to database...");
    let db = outlay_db::connect(&database_url).await?;

    println!("Seeding categories...");
    let utilities = seed_categories(&db).await?;

    println!("Seeding budget...");
    seed_budget(&db).await?;

    println!("Seeding recurring expenses...");
    seed_recurring_expenses(&db, utilities).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Seeds the default categories and returns the Utilities category ID.
async fn seed_categories(db: &DatabaseConnection) -> anyhow::Result<CategoryId> {
    let repo = CategoryRepository::new(db.clone());
    let mut utilities = None;

    for (name, description) in DEFAULT_CATEGORIES {
        let category = repo.find_or_create(name, Some(description), true).await?;
        println!("  {name}");
        if name == "Utilities" {
            utilities = Some(CategoryId::from_uuid(category.id));
        }
    }

    utilities.ok_or_else(|| anyhow::anyhow!("Utilities category missing after seeding"))
}

/// Seeds a 2000.00 monthly limit unless a budget already exists.
async fn seed_budget(db: &DatabaseConnection) -> anyhow::Result<()> {
    let budgets = Arc::new(BudgetRepository::new(db.clone()));
    if budgets.find_current().await?.is_some() {
        println!("  Budget already set, skipping...");
        return Ok(());
    }

    let service = BudgetService::new(budgets, Arc::new(ExpenseRepository::new(db.clone())));
    let budget = service.set_limit(dec!(2000.00)).await?;
    println!("  Monthly limit: {}", budget.monthly_limit);
    Ok(())
}

/// Seeds a monthly internet bill starting on the first of this month.
async fn seed_recurring_expenses(db: &DatabaseConnection, utilities: CategoryId) -> anyhow::Result<()> {
    let store = Arc::new(RecurringExpenseRepository::new(db.clone()));
    if !store.list(false).await?.is_empty() {
        println!("  Recurring expenses already present, skipping...");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let start = today.with_day(1).unwrap_or(today);
    let service = RecurringExpenseService::new(store, Arc::new(CategoryRepository::new(db.clone())));
    let created = service
        .create(RecurringExpenseInput {
            amount: dec!(59.99),
            category_id: utilities,
            description: Some("Internet".to_string()),
            frequency: Frequency::Monthly,
            start_date: start,
            end_date: None,
        })
        .await?;
    println!("  Internet, monthly from {}", created.start_date);
    Ok(())
}
