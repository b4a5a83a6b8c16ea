//! Budget status and goal progress

use std::fmt;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, Goal, GoalStatus, Money, Transaction};

use super::totals::{add_amount, ensure_valid_amount};

/// Default percentage of a budget at which it is flagged
pub const DEFAULT_WARNING_PERCENT: f64 = 80.0;

/// How close a budget is to its cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHealth {
    OnTrack,
    Warning,
    Exceeded,
}

impl BudgetHealth {
    /// Classify a spent percentage
    pub fn classify(percentage: f64, warning_percent: f64) -> Self {
        if percentage >= 100.0 {
            Self::Exceeded
        } else if percentage >= warning_percent {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "On track"),
            Self::Warning => write!(f, "Warning"),
            Self::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// Spending against a budget cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub spent: Money,
    /// Negative when over budget
    pub remaining: Money,
    /// Unclamped; above 100 when over budget
    pub percentage: f64,
    pub health: BudgetHealth,
}

impl BudgetStatus {
    /// Re-classify health against a custom warning threshold
    pub fn with_warning_percent(mut self, warning_percent: f64) -> Self {
        self.health = BudgetHealth::classify(self.percentage, warning_percent);
        self
    }

    /// Percentage clamped to 0-100, for progress bars
    pub fn bar_percentage(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    /// Amount over the cap, if any
    pub fn overspent(&self) -> Option<Money> {
        if self.remaining.is_negative() {
            Some(-self.remaining)
        } else {
            None
        }
    }
}

/// Status of a budget given the amount spent against it
pub fn compute_budget_status(budget: &Budget, spent: Money) -> FinanceResult<BudgetStatus> {
    budget
        .validate()
        .map_err(|e| FinanceError::Validation(e.to_string()))?;
    if spent.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Spent amount cannot be negative: {}",
            spent
        )));
    }

    let percentage = spent.percent_of(budget.amount);
    Ok(BudgetStatus {
        spent,
        remaining: budget.amount - spent,
        percentage,
        health: BudgetHealth::classify(percentage, DEFAULT_WARNING_PERCENT),
    })
}

/// Sum of expenses in the budget's category during the budget's month
///
/// Recomputed from the given transactions on every call.
pub fn compute_budget_spent(budget: &Budget, transactions: &[Transaction]) -> FinanceResult<Money> {
    let mut spent = Money::zero();
    for txn in transactions.iter().filter(|t| {
        t.is_expense() && t.category_id == Some(budget.category_id) && budget.month.contains(t.date)
    }) {
        ensure_valid_amount(txn)?;
        spent = add_amount(spent, txn.amount)?;
    }
    Ok(spent)
}

/// Progress toward a savings goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// May exceed 100
    pub percentage: f64,
    /// Never negative
    pub remaining: Money,
    pub is_completed: bool,
}

/// Progress of a goal from its stored amounts and status
pub fn compute_goal_progress(goal: &Goal) -> FinanceResult<GoalProgress> {
    goal.validate()
        .map_err(|e| FinanceError::Validation(e.to_string()))?;

    Ok(GoalProgress {
        percentage: goal.current_amount.percent_of(goal.target_amount),
        remaining: (goal.target_amount - goal.current_amount).max(Money::zero()),
        is_completed: goal.status == GoalStatus::Completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Month, TransactionKind, UserId};
    use chrono::NaiveDate;

    fn jan() -> Month {
        Month::new(2025, 1).unwrap()
    }

    fn budget(units: i64) -> Budget {
        Budget::new(UserId::new(), CategoryId::new(), jan(), Money::from_units(units))
    }

    #[test]
    fn test_budget_over_cap_example() {
        let status = compute_budget_status(&budget(500), Money::from_units(600)).unwrap();
        assert_eq!(status.spent, Money::from_units(600));
        assert_eq!(status.remaining, Money::from_units(-100));
        assert!((status.percentage - 120.0).abs() < 1e-9);
        assert_eq!(status.health, BudgetHealth::Exceeded);
        assert_eq!(status.overspent(), Some(Money::from_units(100)));
        assert_eq!(status.bar_percentage(), 100.0);
    }

    #[test]
    fn test_budget_nothing_spent() {
        let b = budget(250);
        let status = compute_budget_status(&b, Money::zero()).unwrap();
        assert_eq!(status.percentage, 0.0);
        assert_eq!(status.remaining, b.amount);
        assert_eq!(status.health, BudgetHealth::OnTrack);
        assert_eq!(status.overspent(), None);
    }

    #[test]
    fn test_budget_health_thresholds() {
        let b = budget(100);
        let at = |units| compute_budget_status(&b, Money::from_units(units)).unwrap().health;
        assert_eq!(at(79), BudgetHealth::OnTrack);
        assert_eq!(at(80), BudgetHealth::Warning);
        assert_eq!(at(99), BudgetHealth::Warning);
        assert_eq!(at(100), BudgetHealth::Exceeded);

        let custom = compute_budget_status(&b, Money::from_units(60))
            .unwrap()
            .with_warning_percent(50.0);
        assert_eq!(custom.health, BudgetHealth::Warning);
    }

    #[test]
    fn test_budget_non_positive_amount_rejected() {
        let mut b = budget(0);
        assert!(compute_budget_status(&b, Money::zero())
            .unwrap_err()
            .is_validation());

        b.amount = Money::from_units(-5);
        assert!(compute_budget_status(&b, Money::zero()).is_err());
    }

    #[test]
    fn test_budget_spent_matches_category_and_month() {
        let b = budget(500);
        let user = b.user_id;
        let on = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let make = |kind, cents, category, date| {
            let mut t = Transaction::new(user, kind, Money::from_cents(cents), date);
            t.category_id = category;
            t
        };

        let transactions = vec![
            make(TransactionKind::Expense, 10_000, Some(b.category_id), on(2025, 1, 1)),
            make(TransactionKind::Expense, 5_000, Some(b.category_id), on(2025, 1, 31)),
            make(TransactionKind::Expense, 7_000, Some(b.category_id), on(2025, 2, 1)),
            make(TransactionKind::Expense, 9_000, Some(CategoryId::new()), on(2025, 1, 5)),
            make(TransactionKind::Expense, 1_000, None, on(2025, 1, 5)),
            make(TransactionKind::Income, 20_000, Some(b.category_id), on(2025, 1, 5)),
        ];

        let spent = compute_budget_spent(&b, &transactions).unwrap();
        assert_eq!(spent, Money::from_cents(15_000));
    }

    #[test]
    fn test_goal_reached_example() {
        let goal = Goal::new(UserId::new(), "Fund", Money::from_units(1000))
            .with_current(Money::from_units(1000));
        let progress = compute_goal_progress(&goal).unwrap();

        assert!((progress.percentage - 100.0).abs() < 1e-9);
        assert_eq!(progress.remaining, Money::zero());
        assert!(progress.is_completed);
    }

    #[test]
    fn test_goal_over_target() {
        let goal = Goal::new(UserId::new(), "Fund", Money::from_units(100))
            .with_current(Money::from_units(150));
        let progress = compute_goal_progress(&goal).unwrap();

        assert!((progress.percentage - 150.0).abs() < 1e-9);
        assert_eq!(progress.remaining, Money::zero());
        assert!(progress.is_completed);
    }

    #[test]
    fn test_goal_partial() {
        let goal = Goal::new(UserId::new(), "Fund", Money::from_units(400))
            .with_current(Money::from_units(100));
        let progress = compute_goal_progress(&goal).unwrap();

        assert!((progress.percentage - 25.0).abs() < 1e-9);
        assert_eq!(progress.remaining, Money::from_units(300));
        assert!(!progress.is_completed);
    }

    #[test]
    fn test_cancelled_goal_is_not_completed() {
        let mut goal = Goal::new(UserId::new(), "Fund", Money::from_units(100))
            .with_current(Money::from_units(100));
        goal.cancel();

        let progress = compute_goal_progress(&goal).unwrap();
        assert!(!progress.is_completed);
    }

    #[test]
    fn test_goal_invalid_amounts_rejected() {
        let mut goal = Goal::new(UserId::new(), "Fund", Money::zero());
        assert!(compute_goal_progress(&goal).unwrap_err().is_validation());

        goal.target_amount = Money::from_units(10);
        goal.current_amount = Money::from_cents(-1);
        assert!(compute_goal_progress(&goal).is_err());
    }
}
