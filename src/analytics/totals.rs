//! Income, expense and savings totals

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Transaction};

/// Summary totals for a set of transactions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`
    pub balance: Money,
    /// Share of income kept, in percent; zero when there is no income
    pub savings_rate: f64,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            total_income: Money::zero(),
            total_expenses: Money::zero(),
            balance: Money::zero(),
            savings_rate: 0.0,
        }
    }
}

/// Reject transactions with a negative or oversized amount
pub(crate) fn ensure_valid_amount(txn: &Transaction) -> FinanceResult<()> {
    if txn.amount.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Transaction {} has a negative amount: {}",
            txn.id, txn.amount
        )));
    }
    if txn.amount.exceeds_max() {
        return Err(FinanceError::Validation(format!(
            "Transaction {} amount too large: {}",
            txn.id, txn.amount
        )));
    }
    Ok(())
}

/// Add to a running total, failing instead of overflowing
pub(crate) fn add_amount(total: Money, amount: Money) -> FinanceResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| FinanceError::Validation(format!("Total out of range adding {}", amount)))
}

/// Compute totals over an already date-filtered set of transactions
///
/// The caller narrows the input to the period of interest; every
/// transaction passed in is counted.
pub fn compute_totals(transactions: &[Transaction]) -> FinanceResult<Totals> {
    let mut total_income = Money::zero();
    let mut total_expenses = Money::zero();

    for txn in transactions {
        ensure_valid_amount(txn)?;
        if txn.is_income() {
            total_income = add_amount(total_income, txn.amount)?;
        } else {
            total_expenses = add_amount(total_expenses, txn.amount)?;
        }
    }

    let balance = total_income - total_expenses;

    Ok(Totals {
        total_income,
        total_expenses,
        balance,
        savings_rate: balance.percent_of(total_income),
    })
}
