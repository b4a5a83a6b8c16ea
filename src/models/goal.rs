//! Savings goal model
//!
//! A goal tracks progress toward a target amount. The status is stored, but
//! it is kept consistent with the amounts: reaching the target completes the
//! goal, and only an explicit cancel takes it out of that rule.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{GoalId, UserId};
use super::money::Money;

/// Lifecycle state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("Invalid goal status: {}", other)),
        }
    }
}

/// A savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Owner of the goal
    pub user_id: UserId,

    /// Goal title
    pub title: String,

    /// Amount to reach, always positive
    pub target_amount: Money,

    /// Amount saved so far; may exceed the target
    pub current_amount: Money,

    /// Optional target date
    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub status: GoalStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with nothing saved yet
    pub fn new(user_id: UserId, title: impl Into<String>, target_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            user_id,
            title: title.into(),
            target_amount,
            current_amount: Money::zero(),
            deadline: None,
            status: GoalStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the starting amount, deriving the status from it
    pub fn with_current(mut self, current_amount: Money) -> Self {
        self.current_amount = current_amount;
        self.refresh_status();
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == GoalStatus::Cancelled
    }

    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    pub fn has_reached_target(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Re-derive the status from the amounts; cancelled goals are untouched
    pub fn refresh_status(&mut self) {
        if self.is_cancelled() {
            return;
        }
        self.status = if self.has_reached_target() {
            GoalStatus::Completed
        } else {
            GoalStatus::Active
        };
    }

    /// Add a contribution
    ///
    /// The amount and the status change together: a contribution that
    /// reaches the target completes the goal in the same update.
    pub fn contribute(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution(amount));
        }
        if self.is_cancelled() {
            return Err(GoalValidationError::Cancelled);
        }

        self.current_amount = self
            .current_amount
            .checked_add(amount)
            .filter(|total| !total.exceeds_max())
            .ok_or(GoalValidationError::AmountTooLarge(amount))?;
        if self.has_reached_target() {
            self.status = GoalStatus::Completed;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Mark the goal as cancelled
    pub fn cancel(&mut self) {
        self.status = GoalStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }

        if self.title.len() > 100 {
            return Err(GoalValidationError::TitleTooLong(self.title.len()));
        }

        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }

        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current_amount));
        }

        for amount in [self.target_amount, self.current_amount] {
            if amount.exceeds_max() {
                return Err(GoalValidationError::AmountTooLarge(amount));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {})",
            self.title, self.current_amount, self.target_amount
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    NonPositiveTarget(Money),
    NegativeCurrent(Money),
    NonPositiveContribution(Money),
    AmountTooLarge(Money),
    Cancelled,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Goal title cannot be empty"),
            Self::TitleTooLong(len) => write!(f, "Goal title too long ({} chars, max 100)", len),
            Self::NonPositiveTarget(amount) => {
                write!(f, "Goal target must be greater than zero: {}", amount)
            }
            Self::NegativeCurrent(amount) => {
                write!(f, "Goal current amount cannot be negative: {}", amount)
            }
            Self::NonPositiveContribution(amount) => {
                write!(f, "Contribution must be greater than zero: {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(f, "Goal amount too large: {}", amount),
            Self::Cancelled => write!(f, "Cannot contribute to a cancelled goal"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
