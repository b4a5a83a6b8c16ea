//! Goal repository for JSON storage
//!
//! Manages loading and saving savings goals to goals.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinanceError;
use crate::models::{Goal, GoalId, GoalStatus, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    goals: Vec<Goal>,
}

/// Repository for goal persistence
pub struct GoalRepository {
    path: PathBuf,
    goals: RwLock<HashMap<GoalId, Goal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            goals: RwLock::new(HashMap::new()),
        }
    }

    /// Load goals from disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.clear();
        for goal in file_data.goals {
            goals.insert(goal.id, goal);
        }

        debug!(count = goals.len(), "loaded goals");
        Ok(())
    }

    /// Save goals to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = goals.values().cloned().collect();
        list.sort_by_key(|g| g.created_at);

        write_json_atomic(&self.path, &GoalData { goals: list })
    }

    pub fn get(&self, id: GoalId) -> Result<Option<Goal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.get(&id).cloned())
    }

    /// Find a goal of a user by title (case-insensitive)
    pub fn get_by_title(&self, user_id: UserId, title: &str) -> Result<Option<Goal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let title_lower = title.trim().to_lowercase();
        Ok(goals
            .values()
            .find(|g| g.user_id == user_id && g.title.to_lowercase() == title_lower)
            .cloned())
    }

    /// All goals of a user, newest first
    pub fn get_all(&self, user_id: UserId) -> Result<Vec<Goal>, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = goals
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    /// Goals of a user in a given status
    pub fn get_by_status(
        &self,
        user_id: UserId,
        status: GoalStatus,
    ) -> Result<Vec<Goal>, FinanceError> {
        Ok(self
            .get_all(user_id)?
            .into_iter()
            .filter(|g| g.status == status)
            .collect())
    }

    pub fn upsert(&self, goal: Goal) -> Result<(), FinanceError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.insert(goal.id, goal);
        Ok(())
    }

    pub fn delete(&self, id: GoalId) -> Result<bool, FinanceError> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(goals.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(goals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, GoalRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let goal = Goal::new(UserId::new(), "Vacation", Money::from_units(2000))
            .with_current(Money::from_units(250));
        let id = goal.id;

        repo.upsert(goal).unwrap();
        repo.save().unwrap();

        let repo2 = GoalRepository::new(temp_dir.path().join("goals.json"));
        repo2.load().unwrap();
        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.title, "Vacation");
        assert_eq!(loaded.current_amount, Money::from_units(250));
        assert_eq!(loaded.status, GoalStatus::Active);
    }

    #[test]
    fn test_lookup_by_title_and_status() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::new();

        repo.upsert(Goal::new(user, "New Car", Money::from_units(100)))
            .unwrap();
        repo.upsert(
            Goal::new(user, "Laptop", Money::from_units(100)).with_current(Money::from_units(100)),
        )
        .unwrap();

        assert!(repo.get_by_title(user, "new car").unwrap().is_some());
        assert!(repo.get_by_title(UserId::new(), "new car").unwrap().is_none());
        assert_eq!(
            repo.get_by_status(user, GoalStatus::Completed).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let goal = Goal::new(UserId::new(), "House", Money::from_units(1));
        let id = goal.id;
        repo.upsert(goal).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }
}
