//! Transaction service
//!
//! Provides business logic for transaction management: validated CRUD,
//! category snapshots on read, and filtered listing.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::analytics::TransactionFilter;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    CategoryId, CategorySnapshot, DateRange, Money, Month, Transaction, TransactionId,
    TransactionKind,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FinanceResult<Transaction> {
        let mut txn = Transaction::with_details(
            self.storage.user_id(),
            input.kind,
            input.amount,
            input.date,
            input.category_id,
            input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        );

        txn.category = self.category_snapshot(input.category_id)?;
        txn.validate_for_write()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(
            transaction = %txn.id,
            kind = %txn.kind,
            amount = %txn.amount,
            "created transaction"
        );
        Ok(txn)
    }

    /// Snapshot of a category the user owns, or an error if it does not exist
    fn category_snapshot(
        &self,
        category_id: Option<CategoryId>,
    ) -> FinanceResult<Option<CategorySnapshot>> {
        let Some(cat_id) = category_id else {
            return Ok(None);
        };

        let category = self
            .storage
            .categories
            .get(cat_id)?
            .filter(|c| c.user_id == self.storage.user_id())
            .ok_or_else(|| FinanceError::category_not_found(cat_id.to_string()))?;

        Ok(Some(category.snapshot()))
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FinanceResult<Option<Transaction>> {
        let Some(mut txn) = self
            .storage
            .transactions
            .get(id)?
            .filter(|t| t.user_id == self.storage.user_id())
        else {
            return Ok(None);
        };

        self.attach_categories(std::slice::from_mut(&mut txn))?;
        Ok(Some(txn))
    }

    /// Find a transaction by full or short ID string
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Transaction>> {
        if let Ok(id) = identifier.trim().parse::<TransactionId>() {
            return self.get(id);
        }

        Ok(self
            .list_all()?
            .into_iter()
            .find(|t| t.id.matches(identifier)))
    }

    /// Find a transaction or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinanceResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| FinanceError::transaction_not_found(identifier))
    }

    /// All transactions of the user, newest first, with category snapshots
    pub fn list_all(&self) -> FinanceResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all(self.storage.user_id())?;
        self.attach_categories(&mut transactions)?;
        Ok(transactions)
    }

    /// List transactions matching a filter, newest first
    pub fn list(
        &self,
        filter: &TransactionFilter,
        limit: Option<usize>,
    ) -> FinanceResult<Vec<Transaction>> {
        let user_id = self.storage.user_id();
        let mut transactions = match filter.category_id {
            Some(category_id) => self
                .storage
                .transactions
                .get_by_category(user_id, category_id)?,
            None => self.storage.transactions.get_all(user_id)?,
        };
        self.attach_categories(&mut transactions)?;

        let mut transactions = filter.apply(&transactions);
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Transactions dated within a range, newest first
    pub fn list_in_range(&self, range: DateRange) -> FinanceResult<Vec<Transaction>> {
        let mut transactions = self
            .storage
            .transactions
            .get_by_date_range(self.storage.user_id(), range)?;
        self.attach_categories(&mut transactions)?;
        Ok(transactions)
    }

    /// Transactions of a calendar month, newest first
    pub fn list_for_month(&self, month: Month) -> FinanceResult<Vec<Transaction>> {
        self.list_in_range(month.range())
    }

    /// The most recent transactions
    pub fn recent(&self, limit: usize) -> FinanceResult<Vec<Transaction>> {
        self.list(&TransactionFilter::new(), Some(limit))
    }

    /// Attach the current category snapshot to each transaction
    ///
    /// Transactions whose category no longer exists keep `category: None`.
    pub fn attach_categories(&self, transactions: &mut [Transaction]) -> FinanceResult<()> {
        let snapshots: HashMap<CategoryId, CategorySnapshot> = self
            .storage
            .categories
            .get_all(self.storage.user_id())?
            .iter()
            .map(|c| (c.id, c.snapshot()))
            .collect();

        for txn in transactions.iter_mut() {
            txn.category = txn
                .category_id
                .and_then(|id| snapshots.get(&id))
                .cloned();
        }
        Ok(())
    }

    /// Update a transaction
    ///
    /// `category_id`: `None` leaves the category, `Some(None)` clears it and
    /// `Some(Some(id))` sets it.
    pub fn update(
        &self,
        id: TransactionId,
        kind: Option<TransactionKind>,
        amount: Option<Money>,
        date: Option<NaiveDate>,
        category_id: Option<Option<CategoryId>>,
        description: Option<String>,
    ) -> FinanceResult<Transaction> {
        let mut txn = self
            .get(id)?
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;

        if let Some(new_kind) = kind {
            txn.kind = new_kind;
        }

        if let Some(new_amount) = amount {
            txn.amount = new_amount;
        }

        if let Some(new_date) = date {
            txn.date = new_date;
        }

        if let Some(new_cat_id) = category_id {
            txn.category_id = new_cat_id;
        }
        txn.category = self.category_snapshot(txn.category_id)?;

        if let Some(new_description) = description {
            let trimmed = new_description.trim();
            txn.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }

        txn.updated_at = Utc::now();
        txn.validate_for_write()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(transaction = %txn.id, "updated transaction");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> FinanceResult<Transaction> {
        let txn = self
            .get(id)?
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        info!(transaction = %txn.id, "deleted transaction");
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{Category, UserId};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, UserId::new()).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_category(storage: &Storage, name: &str, kind: TransactionKind) -> Category {
        let category = Category::new(storage.user_id(), name, kind);
        storage.categories.upsert(category.clone()).unwrap();
        category
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn expense(cents: i64, on: NaiveDate, category: Option<CategoryId>) -> CreateTransactionInput {
        CreateTransactionInput {
            kind: TransactionKind::Expense,
            amount: Money::from_cents(cents),
            date: on,
            category_id: category,
            description: None,
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let food = add_category(&storage, "Food", TransactionKind::Expense);

        let txn = service
            .create(CreateTransactionInput {
                description: Some("  Weekly shop ".into()),
                ..expense(4250, date(1, 15), Some(food.id))
            })
            .unwrap();

        assert_eq!(txn.amount.cents(), 4250);
        assert_eq!(txn.description.as_deref(), Some("Weekly shop"));
        assert_eq!(txn.category.as_ref().unwrap().name, "Food");
        assert_eq!(txn.user_id, storage.user_id());
    }

    #[test]
    fn test_create_rejects_zero_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.create(expense(0, date(1, 1), None)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_rejects_kind_mismatch() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let salary = add_category(&storage, "Salary", TransactionKind::Income);

        let err = service
            .create(expense(100, date(1, 1), Some(salary.id)))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_rejects_unknown_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .create(expense(100, date(1, 1), Some(CategoryId::new())))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_with_filter_and_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let food = add_category(&storage, "Food", TransactionKind::Expense);

        service.create(expense(100, date(1, 1), Some(food.id))).unwrap();
        service.create(expense(200, date(1, 2), None)).unwrap();
        service.create(expense(300, date(1, 3), Some(food.id))).unwrap();

        let all = service.list(&TransactionFilter::new(), None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date, date(1, 3));

        let food_only = service
            .list(&TransactionFilter::new().category(food.id), None)
            .unwrap();
        assert_eq!(food_only.len(), 2);

        let limited = service.list(&TransactionFilter::new(), Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].amount.cents(), 300);
    }

    #[test]
    fn test_list_for_month() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(expense(100, date(1, 31), None)).unwrap();
        service.create(expense(200, date(2, 1), None)).unwrap();

        let january = service
            .list_for_month(Month::new(2025, 1).unwrap())
            .unwrap();
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].date, date(1, 31));
    }

    #[test]
    fn test_update_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let food = add_category(&storage, "Food", TransactionKind::Expense);

        let txn = service.create(expense(100, date(1, 1), Some(food.id))).unwrap();

        let updated = service
            .update(
                txn.id,
                None,
                Some(Money::from_cents(250)),
                None,
                Some(None),
                Some("Coffee".into()),
            )
            .unwrap();

        assert_eq!(updated.amount.cents(), 250);
        assert!(updated.category_id.is_none());
        assert!(updated.category.is_none());
        assert_eq!(updated.description_str(), "Coffee");
    }

    #[test]
    fn test_update_kind_must_match_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let food = add_category(&storage, "Food", TransactionKind::Expense);

        let txn = service.create(expense(100, date(1, 1), Some(food.id))).unwrap();

        let err = service
            .update(txn.id, Some(TransactionKind::Income), None, None, None, None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service.create(expense(100, date(1, 1), None)).unwrap();

        let found = service.find(&txn.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, txn.id);
        assert!(service.require("txn-00000000").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service.create(expense(100, date(1, 1), None)).unwrap();
        service.delete(txn.id).unwrap();

        assert!(service.get(txn.id).unwrap().is_none());
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_snapshot_follows_category_rename() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let mut food = add_category(&storage, "Food", TransactionKind::Expense);

        let txn = service.create(expense(100, date(1, 1), Some(food.id))).unwrap();

        food.name = "Groceries".into();
        storage.categories.upsert(food).unwrap();

        let reloaded = service.get(txn.id).unwrap().unwrap();
        assert_eq!(reloaded.category.unwrap().name, "Groceries");
    }
}
