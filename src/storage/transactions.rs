//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinanceError;
use crate::models::{CategoryId, DateRange, Transaction, TransactionId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Newest first, ties broken by creation time
fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            if let Some(cat_id) = txn.category_id {
                by_category.entry(cat_id).or_default().push(txn.id);
            }
            data.insert(txn.id, txn);
        }

        debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All transactions of a user, newest first
    pub fn get_all(&self, user_id: UserId) -> Result<Vec<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Transactions of a user assigned to a category, newest first
    pub fn get_by_category(
        &self,
        user_id: UserId,
        category_id: CategoryId,
    ) -> Result<Vec<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Transactions of a user dated within `range`, newest first
    pub fn get_by_date_range(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<Transaction>, FinanceError> {
        let all = self.get_all(user_id)?;
        Ok(all.into_iter().filter(|t| range.contains(t.date)).collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, mut txn: Transaction) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old_cat) = data.get(&txn.id).and_then(|old| old.category_id) {
            if let Some(ids) = by_category.get_mut(&old_cat) {
                ids.retain(|&id| id != txn.id);
            }
        }

        if let Some(cat_id) = txn.category_id {
            by_category.entry(cat_id).or_default().push(txn.id);
        }

        // Snapshots are attached on read only
        txn.category = None;
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.remove(&id) {
            Some(txn) => {
                if let Some(ids) = txn.category_id.and_then(|c| by_category.get_mut(&c)) {
                    ids.retain(|&tid| tid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clear the category of every transaction assigned to it
    ///
    /// Returns the number of transactions changed.
    pub fn unassign_category(&self, category_id: CategoryId) -> Result<usize, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let ids = by_category.remove(&category_id).unwrap_or_default();
        let now = chrono::Utc::now();
        let mut changed = 0;
        for id in ids {
            if let Some(txn) = data.get_mut(&id) {
                txn.category_id = None;
                txn.updated_at = now;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
