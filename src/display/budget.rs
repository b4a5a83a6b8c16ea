//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_bar, format_percentage};
use crate::services::BudgetWithStatus;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format budgets with their status as a table
pub fn format_budget_table(budgets: &[BudgetWithStatus], currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = budgets.iter().map(|row| BudgetRow {
        id: row.budget.id.to_string(),
        month: row.budget.month.to_string(),
        category: row.category_name.clone(),
        budget: row.budget.amount.format_with_symbol(currency_symbol),
        spent: row.status.spent.format_with_symbol(currency_symbol),
        remaining: row.status.remaining.format_with_symbol(currency_symbol),
        used: format!(
            "{} {}",
            format_bar(row.status.bar_percentage(), 10),
            format_percentage(row.status.percentage)
        ),
        status: row.status.health.to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
