//! Expense breakdown by category

use std::collections::HashMap;

use crate::error::FinanceResult;
use crate::models::category::DEFAULT_CATEGORY_COLOR;
use crate::models::{CategoryId, Money, Transaction};

use super::totals::{add_amount, ensure_valid_amount};

/// Label of the bucket collecting uncategorized expenses
pub const OTHER_LABEL: &str = "Other";

/// Expense total for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryExpense {
    /// Category name, or "Other"
    pub category: String,
    /// None for the "Other" bucket
    pub category_id: Option<CategoryId>,
    pub amount: Money,
    pub color: String,
    /// Share of all expenses, in percent
    pub percentage: f64,
}

impl CategoryExpense {
    pub fn is_other(&self) -> bool {
        self.category_id.is_none()
    }
}

/// Group expense transactions by category
///
/// Transactions without a category, or whose category could not be
/// resolved, are collected into a trailing "Other" entry. Categories appear
/// in the order they are first seen in the input.
pub fn compute_expenses_by_category(
    transactions: &[Transaction],
) -> FinanceResult<Vec<CategoryExpense>> {
    let mut entries: Vec<CategoryExpense> = Vec::new();
    let mut index: HashMap<CategoryId, usize> = HashMap::new();
    let mut other = Money::zero();
    let mut has_other = false;

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        ensure_valid_amount(txn)?;

        let snapshot = match (txn.category_id, &txn.category) {
            (Some(id), Some(snapshot)) if snapshot.id == id => snapshot,
            _ => {
                other = add_amount(other, txn.amount)?;
                has_other = true;
                continue;
            }
        };

        match index.get(&snapshot.id) {
            Some(&i) => entries[i].amount = add_amount(entries[i].amount, txn.amount)?,
            None => {
                index.insert(snapshot.id, entries.len());
                entries.push(CategoryExpense {
                    category: snapshot.name.clone(),
                    category_id: Some(snapshot.id),
                    amount: txn.amount,
                    color: snapshot.color.clone(),
                    percentage: 0.0,
                });
            }
        }
    }

    if has_other {
        entries.push(CategoryExpense {
            category: OTHER_LABEL.to_string(),
            category_id: None,
            amount: other,
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            percentage: 0.0,
        });
    }

    let total = entries
        .iter()
        .try_fold(Money::zero(), |total, e| add_amount(total, e.amount))?;
    for entry in &mut entries {
        entry.percentage = entry.amount.percent_of(total);
    }

    Ok(entries)
}
