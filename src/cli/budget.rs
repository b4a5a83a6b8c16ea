//! Budget CLI commands
//!
//! Implements CLI commands for monthly category budgets.

use clap::Subcommand;

use super::args::{parse_money, parse_month_or_current};
use crate::config::Settings;
use crate::display::budget::format_budget_table;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Budget;
use crate::services::{BudgetService, CategoryService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets of a month with spent and remaining amounts
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set the budget of an expense category for a month
    Set {
        /// Category name or ID
        category: String,
        /// Monthly cap, e.g. "500"
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change the amount of a budget
    Edit {
        /// Budget ID, or a category name together with --month
        budget: String,
        /// New monthly cap
        amount: String,
        /// Month used when BUDGET is a category
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID, or a category name together with --month
        budget: String,
        /// Month used when BUDGET is a category
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Resolve a budget from its ID or from a category and month
fn resolve_budget(
    storage: &Storage,
    identifier: &str,
    month: Option<&str>,
) -> FinanceResult<Budget> {
    let service = BudgetService::new(storage);
    if let Some(budget) = service.find(identifier)? {
        return Ok(budget);
    }

    let category = CategoryService::new(storage).require(identifier)?;
    let month = parse_month_or_current(month)?;
    service
        .get_for_category(category.id, month)?
        .ok_or_else(|| {
            FinanceError::budget_not_found(format!("{} {}", category.name, month))
        })
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let service =
        BudgetService::new(storage).with_warning_percent(settings.budget_warning_percent);

    match cmd {
        BudgetCommands::List { month } => {
            let month = parse_month_or_current(month.as_deref())?;
            let budgets = service.list_with_status(month)?;

            println!("Budgets for {}", month);
            println!(
                "{}",
                format_budget_table(&budgets, &settings.currency_symbol)
            );
        }

        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let category = CategoryService::new(storage).require(&category)?;
            let month = parse_month_or_current(month.as_deref())?;
            let amount = parse_money(&amount)?;

            let budget = service.set(category.id, month, amount)?;
            println!(
                "Budget for {} in {}: {}",
                category.name,
                month,
                budget.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::Edit {
            budget,
            amount,
            month,
        } => {
            let existing = resolve_budget(storage, &budget, month.as_deref())?;
            let amount = parse_money(&amount)?;

            let updated = service.update_amount(existing.id, amount)?;
            println!(
                "Updated budget {}: {}",
                updated.id,
                updated.amount.format_with_symbol(&settings.currency_symbol)
            );
        }

        BudgetCommands::Delete { budget, month } => {
            let existing = resolve_budget(storage, &budget, month.as_deref())?;
            service.delete(existing.id)?;
            println!("Deleted budget: {} ({})", existing.id, existing.month);
        }
    }

    Ok(())
}
