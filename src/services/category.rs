//! Category service
//!
//! Provides business logic for category management: CRUD with per-user
//! name uniqueness, and the cleanup a deletion implies for transactions and
//! budgets.

use chrono::Utc;
use tracing::info;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, CategoryId, TransactionKind};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new category
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    pub kind: TransactionKind,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Changes to apply to a category; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub kind: Option<TransactionKind>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// What a category deletion touched
#[derive(Debug, Clone)]
pub struct CategoryDeletion {
    pub category: Category,
    /// Transactions left without a category
    pub transactions_unassigned: usize,
    /// Budgets removed with the category
    pub budgets_removed: usize,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, input: CreateCategoryInput) -> FinanceResult<Category> {
        let user_id = self.storage.user_id();
        let name = input.name.trim();

        if self.storage.categories.get_by_name(user_id, name)?.is_some() {
            return Err(FinanceError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut category = Category::new(user_id, name, input.kind);
        if let Some(color) = input.color {
            category.color = color.trim().to_lowercase();
        }
        if let Some(icon) = input.icon {
            category.icon = icon.trim().to_string();
        }

        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(category = %category.name, kind = %category.kind, "created category");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> FinanceResult<Option<Category>> {
        let user_id = self.storage.user_id();
        Ok(self
            .storage
            .categories
            .get(id)?
            .filter(|c| c.user_id == user_id))
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Category>> {
        let user_id = self.storage.user_id();

        if let Some(category) = self.storage.categories.get_by_name(user_id, identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.trim().parse::<CategoryId>() {
            return self.get(id);
        }

        // Short display form
        Ok(self
            .list()?
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    /// Find a category or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinanceResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| FinanceError::category_not_found(identifier))
    }

    /// List all categories, sorted by name
    pub fn list(&self) -> FinanceResult<Vec<Category>> {
        self.storage.categories.get_all(self.storage.user_id())
    }

    /// List income or expense categories
    pub fn list_by_kind(&self, kind: TransactionKind) -> FinanceResult<Vec<Category>> {
        self.storage
            .categories
            .get_by_kind(self.storage.user_id(), kind)
    }

    /// Update a category
    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> FinanceResult<Category> {
        let user_id = self.storage.user_id();
        let mut category = self
            .get(id)?
            .ok_or_else(|| FinanceError::category_not_found(id.to_string()))?;

        if let Some(new_name) = input.name {
            let new_name = new_name.trim();
            if let Some(existing) = self.storage.categories.get_by_name(user_id, new_name)? {
                if existing.id != id {
                    return Err(FinanceError::Duplicate {
                        entity_type: "Category",
                        identifier: new_name.to_string(),
                    });
                }
            }
            category.name = new_name.to_string();
        }

        if let Some(kind) = input.kind {
            if kind != category.kind {
                self.check_kind_change(&category, kind)?;
                category.kind = kind;
            }
        }

        if let Some(color) = input.color {
            category.color = color.trim().to_lowercase();
        }

        if let Some(icon) = input.icon {
            category.icon = icon.trim().to_string();
        }

        category.updated_at = Utc::now();
        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(category = %category.name, "updated category");
        Ok(category)
    }

    /// A category may only change kind while nothing depends on the old one
    fn check_kind_change(&self, category: &Category, kind: TransactionKind) -> FinanceResult<()> {
        let user_id = self.storage.user_id();

        let assigned = self
            .storage
            .transactions
            .get_by_category(user_id, category.id)?;
        if assigned.iter().any(|t| t.kind != kind) {
            return Err(FinanceError::Validation(format!(
                "Category '{}' has {} transactions; it cannot become an {} category",
                category.name, category.kind, kind
            )));
        }

        if kind.is_income()
            && self
                .storage
                .budgets
                .get_all(user_id)?
                .iter()
                .any(|b| b.category_id == category.id)
        {
            return Err(FinanceError::Validation(format!(
                "Category '{}' has budgets; only expense categories can be budgeted",
                category.name
            )));
        }

        Ok(())
    }

    /// Delete a category
    ///
    /// Transactions in the category become uncategorized and the category's
    /// budgets are removed.
    pub fn delete(&self, id: CategoryId) -> FinanceResult<CategoryDeletion> {
        let category = self
            .get(id)?
            .ok_or_else(|| FinanceError::category_not_found(id.to_string()))?;

        let transactions_unassigned = self.storage.transactions.unassign_category(id)?;
        let budgets_removed = self.storage.budgets.delete_for_category(id)?;
        self.storage.categories.delete(id)?;

        self.storage.transactions.save()?;
        self.storage.budgets.save()?;
        self.storage.categories.save()?;

        info!(
            category = %category.name,
            transactions_unassigned,
            budgets_removed,
            "deleted category"
        );

        Ok(CategoryDeletion {
            category,
            transactions_unassigned,
            budgets_removed,
        })
    }
}
