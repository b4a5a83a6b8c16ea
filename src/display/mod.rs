//! Display formatting for terminal output
//!
//! Renders models as `tabled` tables and detail views.

pub mod budget;
pub mod category;
pub mod format;
pub mod goal;
pub mod transaction;

pub use budget::format_budget_table;
pub use category::{format_category_details, format_category_table};
pub use goal::format_goal_table;
pub use transaction::{format_transaction_details, format_transaction_table};
