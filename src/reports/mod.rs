//! Reports module for fintrack
//!
//! Provides the monthly dashboard, the budget report and the income/expense
//! trend, each printable to the terminal and exportable as CSV.

pub mod budget;
pub mod dashboard;
pub mod trend;

pub use budget::BudgetReport;
pub use dashboard::DashboardReport;
pub use trend::TrendReport;
