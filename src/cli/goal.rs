//! Goal CLI commands

use clap::Subcommand;

use super::args::{parse_date_arg, parse_money};
use crate::config::Settings;
use crate::display::goal::format_goal_table;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{GoalStatus, Money};
use crate::services::{CreateGoalInput, GoalService, UpdateGoalInput};
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals with their progress
    List {
        /// Only goals in this status (active, completed, cancelled)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Create a savings goal
    Create {
        /// Goal title
        title: String,
        /// Target amount
        target: String,
        /// Amount already saved
        #[arg(short, long)]
        current: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
    },

    /// Edit a goal
    Edit {
        /// Goal title or ID
        goal: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New target amount
        #[arg(short, long)]
        target: Option<String>,
        /// New saved amount
        #[arg(short, long)]
        current: Option<String>,
        /// New deadline (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "clear_deadline")]
        deadline: Option<String>,
        /// Remove the deadline
        #[arg(long)]
        clear_deadline: bool,
    },

    /// Add money to a goal
    Contribute {
        /// Goal title or ID
        goal: String,
        /// Amount to add
        amount: String,
    },

    /// Cancel a goal
    Cancel {
        /// Goal title or ID
        goal: String,
    },

    /// Delete a goal
    Delete {
        /// Goal title or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FinanceResult<()> {
    let service = GoalService::new(storage);
    let money = |m: Money| m.format_with_symbol(&settings.currency_symbol);

    match cmd {
        GoalCommands::List { status } => {
            let status = status
                .as_deref()
                .map(str::parse::<GoalStatus>)
                .transpose()
                .map_err(FinanceError::Validation)?;
            let goals = service.list_with_progress(status)?;
            println!(
                "{}",
                format_goal_table(&goals, &settings.currency_symbol)
            );
        }

        GoalCommands::Create {
            title,
            target,
            current,
            deadline,
        } => {
            let goal = service.create(CreateGoalInput {
                title,
                target_amount: parse_money(&target)?,
                current_amount: current.as_deref().map(parse_money).transpose()?,
                deadline: deadline.as_deref().map(parse_date_arg).transpose()?,
            })?;

            println!("Created goal: {}", goal.title);
            println!("  Target: {}", money(goal.target_amount));
            println!("  Status: {}", goal.status);
            println!("  ID: {}", goal.id);
        }

        GoalCommands::Edit {
            goal,
            title,
            target,
            current,
            deadline,
            clear_deadline,
        } => {
            let existing = service.require(&goal)?;

            let deadline = if clear_deadline {
                Some(None)
            } else {
                deadline
                    .as_deref()
                    .map(parse_date_arg)
                    .transpose()?
                    .map(Some)
            };

            if title.is_none() && target.is_none() && current.is_none() && deadline.is_none() {
                println!(
                    "No changes specified. Use --title, --target, --current, --deadline, \
                     or --clear-deadline."
                );
                return Ok(());
            }

            let updated = service.update(
                existing.id,
                UpdateGoalInput {
                    title,
                    target_amount: target.as_deref().map(parse_money).transpose()?,
                    current_amount: current.as_deref().map(parse_money).transpose()?,
                    deadline,
                },
            )?;
            println!("Updated goal: {} ({})", updated.title, updated.status);
        }

        GoalCommands::Contribute { goal, amount } => {
            let existing = service.require(&goal)?;
            let amount = parse_money(&amount)?;
            let updated = service.contribute(existing.id, amount)?;

            println!(
                "Added {} to {}: {} of {}",
                money(amount),
                updated.title,
                money(updated.current_amount),
                money(updated.target_amount)
            );
            if updated.is_completed() && !existing.is_completed() {
                println!("Goal reached!");
            }
        }

        GoalCommands::Cancel { goal } => {
            let existing = service.require(&goal)?;
            let cancelled = service.cancel(existing.id)?;
            println!("Cancelled goal: {}", cancelled.title);
        }

        GoalCommands::Delete { goal } => {
            let existing = service.require(&goal)?;
            service.delete(existing.id)?;
            println!("Deleted goal: {}", existing.title);
        }
    }

    Ok(())
}
