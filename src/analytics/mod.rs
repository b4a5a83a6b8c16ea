//! Derived metrics over loaded records
//!
//! Everything here is a pure function of its inputs: no storage access, no
//! clock reads. Callers load and narrow the records, then pass them in.

pub mod breakdown;
pub mod filter;
pub mod progress;
pub mod series;
pub mod totals;

pub use breakdown::{compute_expenses_by_category, CategoryExpense, OTHER_LABEL};
pub use filter::TransactionFilter;
pub use progress::{
    compute_budget_spent, compute_budget_status, compute_goal_progress, BudgetHealth,
    BudgetStatus, GoalProgress, DEFAULT_WARNING_PERCENT,
};
pub use series::{compute_time_series, daily_buckets, monthly_buckets, Bucket, SeriesPoint};
pub use totals::{compute_totals, Totals};
