//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinanceError;
use crate::models::{Category, CategoryId, TransactionKind, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        debug!(count = categories.len(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.get(&id).cloned())
    }

    /// All categories of a user, sorted by name
    pub fn get_all(&self, user_id: UserId) -> Result<Vec<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by_key(|c| c.name.to_lowercase());
        Ok(list)
    }

    /// Categories of a user with the given kind
    pub fn get_by_kind(
        &self,
        user_id: UserId,
        kind: TransactionKind,
    ) -> Result<Vec<Category>, FinanceError> {
        Ok(self
            .get_all(user_id)?
            .into_iter()
            .filter(|c| c.kind == kind)
            .collect())
    }

    /// Find a category of a user by name (case-insensitive)
    pub fn get_by_name(&self, user_id: UserId, name: &str) -> Result<Option<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.user_id == user_id && c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), FinanceError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category
    pub fn delete(&self, id: CategoryId) -> Result<bool, FinanceError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(categories.remove(&id).is_some())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(categories.len())
    }
}
