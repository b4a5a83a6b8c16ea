//! Dashboard Report
//!
//! The monthly overview: income, expenses and savings rate for the month,
//! where the money went, day-by-day and month-by-month series, budgets,
//! active goals and the latest transactions.

use std::io::Write;

use tracing::debug;

use crate::analytics::{
    compute_expenses_by_category, compute_time_series, compute_totals, daily_buckets,
    monthly_buckets, CategoryExpense, SeriesPoint, Totals,
};
use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{DateRange, GoalStatus, Money, Month, Transaction};
use crate::services::{
    BudgetService, BudgetWithStatus, GoalService, GoalWithProgress, TransactionService,
};
use crate::storage::Storage;

/// Dashboard for one month
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// The month the totals and breakdown cover
    pub month: Month,
    /// Currency symbol used in terminal output
    pub currency_symbol: String,
    pub totals: Totals,
    /// Expenses of the month per category, "Other" last
    pub expenses_by_category: Vec<CategoryExpense>,
    /// One point per day of the month
    pub daily: Vec<SeriesPoint>,
    /// One point per month of the trailing trend window, oldest first
    pub monthly: Vec<SeriesPoint>,
    pub budgets: Vec<BudgetWithStatus>,
    pub active_goals: Vec<GoalWithProgress>,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardReport {
    /// Generate the dashboard for a month
    pub fn generate(storage: &Storage, month: Month, settings: &Settings) -> FinanceResult<Self> {
        let transaction_service = TransactionService::new(storage);
        let budget_service =
            BudgetService::new(storage).with_warning_percent(settings.budget_warning_percent);
        let goal_service = GoalService::new(storage);

        let month_transactions = transaction_service.list_for_month(month)?;
        let totals = compute_totals(&month_transactions)?;
        let expenses_by_category = compute_expenses_by_category(&month_transactions)?;
        let daily = compute_time_series(&month_transactions, &daily_buckets(month.range()))?;

        let buckets = monthly_buckets(month, settings.trend_months.max(1));
        let monthly = match (buckets.first(), buckets.last()) {
            (Some(first), Some(last)) => {
                let window = DateRange::new(first.range.start, last.range.end)
                    .map_err(|e| FinanceError::Validation(e.to_string()))?;
                let window_transactions = transaction_service.list_in_range(window)?;
                compute_time_series(&window_transactions, &buckets)?
            }
            _ => Vec::new(),
        };

        let budgets = budget_service.list_with_status(month)?;
        let active_goals = goal_service.list_with_progress(Some(GoalStatus::Active))?;
        let recent_transactions = transaction_service.recent(settings.recent_transactions_limit)?;

        debug!(
            month = %month,
            transactions = month_transactions.len(),
            categories = expenses_by_category.len(),
            "generated dashboard"
        );

        Ok(Self {
            month,
            currency_symbol: settings.currency_symbol.clone(),
            totals,
            expenses_by_category,
            daily,
            monthly,
            budgets,
            active_goals,
            recent_transactions,
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", self.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Income:",
            self.money(self.totals.total_income)
        ));
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Expenses:",
            self.money(self.totals.total_expenses)
        ));
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Balance:",
            self.money(self.totals.balance)
        ));
        output.push_str(&format!(
            "{:<20} {:>15.1}%\n",
            "Savings rate:", self.totals.savings_rate
        ));

        output.push_str("\nExpenses by Category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.expenses_by_category.is_empty() {
            output.push_str("  No expenses this month.\n");
        }
        for entry in &self.expenses_by_category {
            output.push_str(&format!(
                "  {:<26} {:>16} {:>10.1}%\n",
                entry.category,
                self.money(entry.amount),
                entry.percentage
            ));
        }

        output.push_str("\nMonthly Trend\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "  {:<10} {:>15} {:>15} {:>15}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        for point in &self.monthly {
            output.push_str(&format!(
                "  {:<10} {:>15} {:>15} {:>15}\n",
                point.label,
                self.money(point.income),
                self.money(point.expenses),
                self.money(point.net())
            ));
        }

        if !self.budgets.is_empty() {
            output.push_str("\nBudgets\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for row in &self.budgets {
                output.push_str(&format!(
                    "  {:<20} {:>12} of {:>12} {:>7.1}%  {}\n",
                    row.category_name,
                    self.money(row.status.spent),
                    self.money(row.budget.amount),
                    row.status.percentage,
                    row.status.health
                ));
            }
        }

        if !self.active_goals.is_empty() {
            output.push_str("\nActive Goals\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for entry in &self.active_goals {
                output.push_str(&format!(
                    "  {:<20} {:>12} of {:>12} {:>7.1}%\n",
                    entry.goal.title,
                    self.money(entry.goal.current_amount),
                    self.money(entry.goal.target_amount),
                    entry.progress.percentage
                ));
            }
        }

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.recent_transactions.is_empty() {
            output.push_str("  No transactions yet.\n");
        }
        for txn in &self.recent_transactions {
            let sign = if txn.is_expense() { "-" } else { "+" };
            let category = txn
                .category
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or("Uncategorized");
            output.push_str(&format!(
                "  {} {:<18} {:<20} {}{}\n",
                txn.date,
                category,
                txn.description_str(),
                sign,
                self.money(txn.amount)
            ));
        }

        output
    }

    /// Export the report as CSV
    ///
    /// One row per summary figure, category and series point, tagged with the
    /// section it belongs to.
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record([
            "section", "label", "start", "end", "income", "expenses", "amount", "percentage",
        ])?;

        let month_start = self.month.start_date().to_string();
        let month_end = self.month.end_date().to_string();
        let summary = [
            ("income", self.totals.total_income),
            ("expenses", self.totals.total_expenses),
            ("balance", self.totals.balance),
        ];
        for (label, amount) in summary {
            csv.write_record([
                "summary",
                label,
                &month_start,
                &month_end,
                "",
                "",
                &amount.to_string(),
                "",
            ])?;
        }
        csv.write_record([
            "summary",
            "savings_rate",
            &month_start,
            &month_end,
            "",
            "",
            "",
            &format!("{:.2}", self.totals.savings_rate),
        ])?;

        for entry in &self.expenses_by_category {
            csv.write_record([
                "category",
                &entry.category,
                &month_start,
                &month_end,
                "",
                "",
                &entry.amount.to_string(),
                &format!("{:.2}", entry.percentage),
            ])?;
        }

        for (section, points) in [("daily", &self.daily), ("monthly", &self.monthly)] {
            for point in points {
                csv.write_record([
                    section,
                    &point.label,
                    &point.start.to_string(),
                    &point.end.to_string(),
                    &point.income.to_string(),
                    &point.expenses.to_string(),
                    &point.net().to_string(),
                    "",
                ])?;
            }
        }

        csv.flush()?;
        Ok(())
    }
}
