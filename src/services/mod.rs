//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, ownership checks, and cross-entity operations.

pub mod budget;
pub mod category;
pub mod goal;
pub mod transaction;

pub use budget::{BudgetService, BudgetWithStatus};
pub use category::{CategoryDeletion, CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use goal::{CreateGoalInput, GoalService, GoalWithProgress, UpdateGoalInput};
pub use transaction::{CreateTransactionInput, TransactionService};
