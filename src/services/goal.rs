//! Goal service
//!
//! Savings goals: CRUD, contributions and cancellation. Status is always
//! derived from the amounts unless the goal was cancelled.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::analytics::{compute_goal_progress, GoalProgress};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Goal, GoalId, GoalStatus, Money};
use crate::storage::Storage;

/// Service for goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub title: String,
    pub target_amount: Money,
    pub current_amount: Option<Money>,
    pub deadline: Option<NaiveDate>,
}

/// Changes to apply to a goal; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    pub title: Option<String>,
    pub target_amount: Option<Money>,
    pub current_amount: Option<Money>,
    /// `Some(None)` clears the deadline
    pub deadline: Option<Option<NaiveDate>>,
}

/// A goal with its computed progress
#[derive(Debug, Clone)]
pub struct GoalWithProgress {
    pub goal: Goal,
    pub progress: GoalProgress,
}

impl<'a> GoalService<'a> {
    /// Create a new goal service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new goal
    pub fn create(&self, input: CreateGoalInput) -> FinanceResult<Goal> {
        let title = input.title.trim();
        self.ensure_unique_title(title, None)?;

        let mut goal = Goal::new(self.storage.user_id(), title, input.target_amount)
            .with_current(input.current_amount.unwrap_or_default());
        goal.deadline = input.deadline;

        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        info!(goal = %goal.title, target = %goal.target_amount, "created goal");
        Ok(goal)
    }

    fn ensure_unique_title(&self, title: &str, except: Option<GoalId>) -> FinanceResult<()> {
        match self
            .storage
            .goals
            .get_by_title(self.storage.user_id(), title)?
        {
            Some(existing) if Some(existing.id) != except => Err(FinanceError::Duplicate {
                entity_type: "Goal",
                identifier: title.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Get a goal by ID
    pub fn get(&self, id: GoalId) -> FinanceResult<Option<Goal>> {
        Ok(self
            .storage
            .goals
            .get(id)?
            .filter(|g| g.user_id == self.storage.user_id()))
    }

    /// Find a goal by title or ID string
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Goal>> {
        if let Some(goal) = self
            .storage
            .goals
            .get_by_title(self.storage.user_id(), identifier)?
        {
            return Ok(Some(goal));
        }

        if let Ok(id) = identifier.trim().parse::<GoalId>() {
            return self.get(id);
        }

        Ok(self
            .list()?
            .into_iter()
            .find(|g| g.id.matches(identifier)))
    }

    /// Find a goal or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinanceResult<Goal> {
        self.find(identifier)?
            .ok_or_else(|| FinanceError::goal_not_found(identifier))
    }

    /// All goals, newest first
    pub fn list(&self) -> FinanceResult<Vec<Goal>> {
        self.storage.goals.get_all(self.storage.user_id())
    }

    /// Goals in a given status
    pub fn list_by_status(&self, status: GoalStatus) -> FinanceResult<Vec<Goal>> {
        self.storage
            .goals
            .get_by_status(self.storage.user_id(), status)
    }

    /// Goals with their progress, optionally narrowed to one status
    pub fn list_with_progress(
        &self,
        status: Option<GoalStatus>,
    ) -> FinanceResult<Vec<GoalWithProgress>> {
        let goals = match status {
            Some(status) => self.list_by_status(status)?,
            None => self.list()?,
        };

        goals
            .into_iter()
            .map(|goal| {
                let progress = compute_goal_progress(&goal)?;
                Ok(GoalWithProgress { goal, progress })
            })
            .collect()
    }

    /// Update a goal
    pub fn update(&self, id: GoalId, input: UpdateGoalInput) -> FinanceResult<Goal> {
        let mut goal = self
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        if let Some(title) = input.title {
            let title = title.trim();
            self.ensure_unique_title(title, Some(id))?;
            goal.title = title.to_string();
        }

        if let Some(target) = input.target_amount {
            goal.target_amount = target;
        }

        if let Some(current) = input.current_amount {
            goal.current_amount = current;
        }

        if let Some(deadline) = input.deadline {
            goal.deadline = deadline;
        }

        goal.refresh_status();
        goal.updated_at = Utc::now();
        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        info!(goal = %goal.title, status = %goal.status, "updated goal");
        Ok(goal)
    }

    /// Add money to a goal
    ///
    /// Completed goals accept further contributions; cancelled goals do not.
    pub fn contribute(&self, id: GoalId, amount: Money) -> FinanceResult<Goal> {
        let mut goal = self
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        let was_completed = goal.is_completed();
        goal.contribute(amount)
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        info!(
            goal = %goal.title,
            amount = %amount,
            current = %goal.current_amount,
            "contributed to goal"
        );
        if goal.is_completed() && !was_completed {
            info!(goal = %goal.title, "goal completed");
        }
        Ok(goal)
    }

    /// Cancel a goal
    pub fn cancel(&self, id: GoalId) -> FinanceResult<Goal> {
        let mut goal = self
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        if goal.is_cancelled() {
            return Err(FinanceError::Validation(format!(
                "Goal '{}' is already cancelled",
                goal.title
            )));
        }

        goal.cancel();
        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        info!(goal = %goal.title, "cancelled goal");
        Ok(goal)
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> FinanceResult<Goal> {
        let goal = self
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        self.storage.goals.delete(id)?;
        self.storage.goals.save()?;

        info!(goal = %goal.title, "deleted goal");
        Ok(goal)
    }
}
