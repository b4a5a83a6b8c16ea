//! Budget Report
//!
//! Every budget of a month with what was spent against it.

use std::io::Write;

use tracing::debug;

use crate::analytics::totals::add_amount;
use crate::config::Settings;
use crate::error::FinanceResult;
use crate::models::{Money, Month};
use crate::services::{BudgetService, BudgetWithStatus};
use crate::storage::Storage;

/// Budgets of one month with their status
#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub month: Month,
    pub currency_symbol: String,
    pub rows: Vec<BudgetWithStatus>,
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
}

impl BudgetReport {
    /// Generate the budget report for a month
    pub fn generate(storage: &Storage, month: Month, settings: &Settings) -> FinanceResult<Self> {
        let rows = BudgetService::new(storage)
            .with_warning_percent(settings.budget_warning_percent)
            .list_with_status(month)?;

        let total_budgeted = rows
            .iter()
            .try_fold(Money::zero(), |total, r| add_amount(total, r.budget.amount))?;
        let total_spent = rows
            .iter()
            .try_fold(Money::zero(), |total, r| add_amount(total, r.status.spent))?;

        debug!(month = %month, budgets = rows.len(), "generated budget report");

        Ok(Self {
            month,
            currency_symbol: settings.currency_symbol.clone(),
            rows,
            total_budgeted,
            total_spent,
            total_remaining: total_budgeted - total_spent,
        })
    }

    /// Budgets spent past their cap
    pub fn exceeded(&self) -> Vec<&BudgetWithStatus> {
        self.rows
            .iter()
            .filter(|r| r.status.overspent().is_some())
            .collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let money = |m: Money| m.format_with_symbol(&self.currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Budgets - {}\n", self.month));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets set for this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>7}  {}\n",
            "Category", "Budget", "Spent", "Remaining", "Used", "Status"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>6.1}%  {}\n",
                row.category_name,
                money(row.budget.amount),
                money(row.status.spent),
                money(row.status.remaining),
                row.status.percentage,
                row.status.health
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12}\n",
            "TOTAL",
            money(self.total_budgeted),
            money(self.total_spent),
            money(self.total_remaining)
        ));

        let exceeded = self.exceeded().len();
        if exceeded > 0 {
            output.push_str(&format!("\n{} budget(s) exceeded\n", exceeded));
        }

        output
    }

    /// Export the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "month", "category", "budget", "spent", "remaining", "percentage", "status",
        ])?;

        let month = self.month.to_string();
        for row in &self.rows {
            csv.write_record([
                month.as_str(),
                &row.category_name,
                &row.budget.amount.to_string(),
                &row.status.spent.to_string(),
                &row.status.remaining.to_string(),
                &format!("{:.2}", row.status.percentage),
                &row.status.health.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
