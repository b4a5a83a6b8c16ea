//! Goal display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_bar, format_percentage};
use crate::services::GoalWithProgress;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format goals with their progress as a table
pub fn format_goal_table(goals: &[GoalWithProgress], currency_symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals found.".to_string();
    }

    let rows = goals.iter().map(|entry| GoalRow {
        id: entry.goal.id.to_string(),
        title: entry.goal.title.clone(),
        saved: entry.goal.current_amount.format_with_symbol(currency_symbol),
        target: entry.goal.target_amount.format_with_symbol(currency_symbol),
        remaining: entry.progress.remaining.format_with_symbol(currency_symbol),
        progress: format!(
            "{} {}",
            format_bar(entry.progress.percentage, 10),
            format_percentage(entry.progress.percentage)
        ),
        deadline: entry
            .goal
            .deadline
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        status: entry.goal.status.to_string(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::compute_goal_progress;
    use crate::models::{Goal, Money, UserId};

    #[test]
    fn test_table() {
        let goal = Goal::new(UserId::new(), "Vacation", Money::from_units(2000))
            .with_current(Money::from_units(500));
        let progress = compute_goal_progress(&goal).unwrap();

        let output = format_goal_table(&[GoalWithProgress { goal, progress }], "$");
        assert!(output.contains("Vacation"));
        assert!(output.contains("$1,500.00"));
        assert!(output.contains("25.0%"));
        assert!(output.contains("active"));
    }
}
