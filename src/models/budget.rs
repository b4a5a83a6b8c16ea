//! Budget model
//!
//! A budget caps spending in one expense category for one calendar month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;
use super::period::Month;

/// A monthly spending cap for a single expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Owner of the budget
    pub user_id: UserId,

    /// The expense category this budget caps
    pub category_id: CategoryId,

    /// Monthly cap, always positive
    pub amount: Money,

    /// The month this budget applies to
    pub month: Month,

    /// When this budget was created
    pub created_at: DateTime<Utc>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(user_id: UserId, category_id: CategoryId, month: Month, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            category_id,
            amount,
            month,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the monthly cap
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cap: {}", self.month, self.amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    IncomeCategory(String),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be greater than zero: {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(f, "Budget amount too large: {}", amount),
            Self::IncomeCategory(name) => {
                write!(f, "Budgets can only be set on expense categories, '{}' is income", name)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
