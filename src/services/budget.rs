//! Budget service
//!
//! Provides business logic for monthly category budgets: one budget per
//! expense category per month, and spent/remaining status computed from the
//! month's transactions.

use tracing::{debug, info};

use crate::analytics::{
    compute_budget_spent, compute_budget_status, BudgetStatus, DEFAULT_WARNING_PERCENT,
};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetId, BudgetValidationError, Category, CategoryId, Money, Month};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    warning_percent: f64,
}

/// A budget together with its category and current status
#[derive(Debug, Clone)]
pub struct BudgetWithStatus {
    pub budget: Budget,
    /// Category name, or the category ID if it cannot be resolved
    pub category_name: String,
    pub status: BudgetStatus,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            warning_percent: DEFAULT_WARNING_PERCENT,
        }
    }

    /// Percentage of a budget at which it is flagged as a warning
    pub fn with_warning_percent(mut self, warning_percent: f64) -> Self {
        self.warning_percent = warning_percent;
        self
    }

    /// Set the budget of a category for a month
    pub fn set(&self, category_id: CategoryId, month: Month, amount: Money) -> FinanceResult<Budget> {
        let user_id = self.storage.user_id();
        let category = self.budgetable_category(category_id)?;

        if self
            .storage
            .budgets
            .get_for_category_month(user_id, category_id, month)?
            .is_some()
        {
            return Err(FinanceError::Duplicate {
                entity_type: "Budget",
                identifier: format!("{} {}", category.name, month),
            });
        }

        let budget = Budget::new(user_id, category_id, month, amount);
        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        info!(
            category = %category.name,
            month = %month,
            amount = %amount,
            "set budget"
        );
        Ok(budget)
    }

    /// Resolve a category the user owns that can carry a budget
    fn budgetable_category(&self, category_id: CategoryId) -> FinanceResult<Category> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .filter(|c| c.user_id == self.storage.user_id())
            .ok_or_else(|| FinanceError::category_not_found(category_id.to_string()))?;

        if category.kind.is_income() {
            return Err(FinanceError::Validation(
                BudgetValidationError::IncomeCategory(category.name).to_string(),
            ));
        }

        Ok(category)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> FinanceResult<Option<Budget>> {
        Ok(self
            .storage
            .budgets
            .get(id)?
            .filter(|b| b.user_id == self.storage.user_id()))
    }

    /// Find a budget by full or short ID string
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Budget>> {
        if let Ok(id) = identifier.trim().parse::<BudgetId>() {
            return self.get(id);
        }

        Ok(self
            .list()?
            .into_iter()
            .find(|b| b.id.matches(identifier)))
    }

    /// Find a budget or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinanceResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| FinanceError::budget_not_found(identifier))
    }

    /// The budget of a category for a month, if set
    pub fn get_for_category(
        &self,
        category_id: CategoryId,
        month: Month,
    ) -> FinanceResult<Option<Budget>> {
        self.storage
            .budgets
            .get_for_category_month(self.storage.user_id(), category_id, month)
    }

    /// All budgets, newest month first
    pub fn list(&self) -> FinanceResult<Vec<Budget>> {
        self.storage.budgets.get_all(self.storage.user_id())
    }

    /// Budgets of a month
    pub fn list_for_month(&self, month: Month) -> FinanceResult<Vec<Budget>> {
        self.storage
            .budgets
            .get_for_month(self.storage.user_id(), month)
    }

    /// Amount spent against a budget
    pub fn spent(&self, budget: &Budget) -> FinanceResult<Money> {
        let transactions = self
            .storage
            .transactions
            .get_by_category(self.storage.user_id(), budget.category_id)?;
        compute_budget_spent(budget, &transactions)
    }

    /// Current status of a budget
    pub fn status(&self, budget: &Budget) -> FinanceResult<BudgetStatus> {
        let spent = self.spent(budget)?;
        Ok(compute_budget_status(budget, spent)?.with_warning_percent(self.warning_percent))
    }

    /// Budgets of a month with their status, sorted by category name
    pub fn list_with_status(&self, month: Month) -> FinanceResult<Vec<BudgetWithStatus>> {
        let user_id = self.storage.user_id();
        let budgets = self.list_for_month(month)?;
        let transactions = self
            .storage
            .transactions
            .get_by_date_range(user_id, month.range())?;

        let mut result = Vec::with_capacity(budgets.len());
        for budget in budgets {
            let spent = compute_budget_spent(&budget, &transactions)?;
            let status =
                compute_budget_status(&budget, spent)?.with_warning_percent(self.warning_percent);
            let category_name = self
                .storage
                .categories
                .get(budget.category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| budget.category_id.to_string());

            result.push(BudgetWithStatus {
                budget,
                category_name,
                status,
            });
        }

        result.sort_by_key(|b| b.category_name.to_lowercase());
        debug!(month = %month, count = result.len(), "computed budget statuses");
        Ok(result)
    }

    /// Change the monthly cap of a budget
    pub fn update_amount(&self, id: BudgetId, amount: Money) -> FinanceResult<Budget> {
        let mut budget = self
            .get(id)?
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))?;

        budget.set_amount(amount);
        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        info!(budget = %budget.id, amount = %amount, "updated budget");
        Ok(budget)
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> FinanceResult<Budget> {
        let budget = self
            .get(id)?
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        info!(budget = %budget.id, "deleted budget");
        Ok(budget)
    }
}
