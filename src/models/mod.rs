//! Core data models for fintrack
//!
//! This module contains the records the tracker persists: transactions,
//! categories, monthly budgets and savings goals, plus the value types they
//! are built from.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use category::{Category, CategorySnapshot, CategoryValidationError};
pub use goal::{Goal, GoalStatus, GoalValidationError};
pub use ids::{BudgetId, CategoryId, GoalId, TransactionId, UserId};
pub use money::Money;
pub use period::{DateRange, Month};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
