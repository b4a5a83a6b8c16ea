//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinanceError;
use crate::models::{Budget, BudgetId, CategoryId, Month, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        debug!(count = budgets.len(), "loaded budgets");
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| b.month.cmp(&a.month).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// The budget of a category for a month, if one is set
    pub fn get_for_category_month(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        month: Month,
    ) -> Result<Option<Budget>, FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .values()
            .find(|b| b.user_id == user_id && b.category_id == category_id && b.month == month)
            .cloned())
    }

    /// All budgets of a user for a month, oldest first
    pub fn get_for_month(&self, user_id: UserId, month: Month) -> Result<Vec<Budget>, FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.user_id == user_id && b.month == month)
            .cloned()
            .collect();
        list.sort_by_key(|b| b.created_at);
        Ok(list)
    }

    /// All budgets of a user, newest month first
    pub fn get_all(&self, user_id: UserId) -> Result<Vec<Budget>, FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.month.cmp(&a.month).then(a.created_at.cmp(&b.created_at)));
        Ok(list)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), FinanceError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> Result<bool, FinanceError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(&id).is_some())
    }

    /// Delete all budgets for a category
    pub fn delete_for_category(&self, category_id: CategoryId) -> Result<usize, FinanceError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let initial_count = budgets.len();
        budgets.retain(|_, b| b.category_id != category_id);
        Ok(initial_count - budgets.len())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, FinanceError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let repo = BudgetRepository::new(path);
        (temp_dir, repo)
    }

    fn month(m: u32) -> Month {
        Month::new(2025, m).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_lookup() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let category_id = CategoryId::new();

        let budget = Budget::new(user, category_id, month(1), Money::from_cents(50000));
        let id = budget.id;
        repo.upsert(budget).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().amount.cents(), 50000);
        assert!(repo
            .get_for_category_month(user, category_id, month(1))
            .unwrap()
            .is_some());
        assert!(repo
            .get_for_category_month(user, category_id, month(2))
            .unwrap()
            .is_none());
        assert!(repo
            .get_for_category_month(UserId::new(), category_id, month(1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_get_for_month() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let cat1 = CategoryId::new();
        let cat2 = CategoryId::new();

        repo.upsert(Budget::new(user, cat1, month(1), Money::from_cents(100)))
            .unwrap();
        repo.upsert(Budget::new(user, cat2, month(1), Money::from_cents(200)))
            .unwrap();
        repo.upsert(Budget::new(user, cat1, month(2), Money::from_cents(300)))
            .unwrap();

        assert_eq!(repo.get_for_month(user, month(1)).unwrap().len(), 2);
        assert_eq!(repo.get_for_month(user, month(2)).unwrap().len(), 1);

        let all = repo.get_all(user).unwrap();
        assert_eq!(all[0].month, month(2));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let budget = Budget::new(UserId::new(), CategoryId::new(), month(3), Money::from_units(80));
        let id = budget.id;

        repo.upsert(budget).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo2.load().unwrap();
        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.month, month(3));
        assert_eq!(retrieved.amount, Money::from_units(80));
    }

    #[test]
    fn test_delete_for_category() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();
        let cat1 = CategoryId::new();
        let cat2 = CategoryId::new();

        repo.upsert(Budget::new(user, cat1, month(1), Money::from_cents(1)))
            .unwrap();
        repo.upsert(Budget::new(user, cat1, month(2), Money::from_cents(1)))
            .unwrap();
        repo.upsert(Budget::new(user, cat2, month(1), Money::from_cents(1)))
            .unwrap();

        assert_eq!(repo.delete_for_category(cat1).unwrap(), 2);
        assert_eq!(repo.count().unwrap(), 1);
    }
}
