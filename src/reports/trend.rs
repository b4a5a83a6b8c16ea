//! Trend Report
//!
//! Month-by-month income and expenses over a trailing window.

use std::io::Write;

use tracing::debug;

use crate::analytics::{compute_time_series, compute_totals, monthly_buckets, SeriesPoint};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{DateRange, Money, Month};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Income and expenses per month, oldest first
#[derive(Debug, Clone)]
pub struct TrendReport {
    /// The last month of the window
    pub through: Month,
    pub points: Vec<SeriesPoint>,
    pub total_income: Money,
    pub total_expenses: Money,
}

impl TrendReport {
    /// Generate a trend of `months` months ending with `through`
    pub fn generate(storage: &Storage, through: Month, months: usize) -> FinanceResult<Self> {
        if months == 0 {
            return Err(FinanceError::Validation(
                "Trend must cover at least one month".into(),
            ));
        }

        let buckets = monthly_buckets(through, months);
        let start = buckets
            .first()
            .map(|b| b.range.start)
            .unwrap_or_else(|| through.start_date());
        let window = DateRange::new(start, through.end_date())
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let transactions = TransactionService::new(storage).list_in_range(window)?;
        let points = compute_time_series(&transactions, &buckets)?;

        let totals = compute_totals(&transactions)?;

        debug!(through = %through, months, "generated trend report");

        Ok(Self {
            through,
            points,
            total_income: totals.total_income,
            total_expenses: totals.total_expenses,
        })
    }

    /// Average monthly net over the window
    pub fn average_net(&self) -> Money {
        (self.total_income - self.total_expenses).divide_evenly(self.points.len())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Trend - {} months through {}\n",
            self.points.len(),
            self.through
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>15} {:>15} {:>15}\n",
                point.label,
                money(point.income),
                money(point.expenses),
                money(point.net())
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>15} {:>15} {:>15}\n",
            "TOTAL",
            money(self.total_income),
            money(self.total_expenses),
            money(self.total_income - self.total_expenses)
        ));
        output.push_str(&format!("\nAverage monthly net: {}\n", money(self.average_net())));

        output
    }

    /// Export the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FinanceResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["month", "start", "end", "income", "expenses", "net"])?;

        for point in &self.points {
            csv.write_record([
                point.label.clone(),
                point.start.to_string(),
                point.end.to_string(),
                point.income.to_string(),
                point.expenses.to_string(),
                point.net().to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}
