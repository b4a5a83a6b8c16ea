//! Storage layer for fintrack
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Every read is scoped to the profile owner the storage was
//! opened for.

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use crate::config::paths::FintrackPaths;
use crate::error::FinanceError;
use crate::models::UserId;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FintrackPaths,
    user_id: UserId,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub goals: GoalRepository,
}

impl Storage {
    /// Create a new Storage instance for a profile owner
    pub fn new(paths: FintrackPaths, user_id: UserId) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            goals: GoalRepository::new(paths.goals_file()),
            user_id,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    /// The user every read is scoped to
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FinanceError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.budgets.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinanceError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
