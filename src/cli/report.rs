//! CLI commands for reports
//!
//! Prints the dashboard, budget and trend reports, or exports them as CSV.

use std::path::PathBuf;

use clap::Subcommand;

use super::args::{open_output, parse_month_or_current};
use crate::config::Settings;
use crate::error::FinanceResult;
use crate::reports::{BudgetReport, DashboardReport, TrendReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Monthly dashboard: totals, category breakdown, series, recent activity
    Dashboard {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to a CSV file ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income and expenses per month
    Trend {
        /// Number of months, defaults to the configured trend length
        #[arg(short = 'n', long)]
        months: Option<usize>,

        /// Last month of the trend (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to a CSV file ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budgets of a month with their status
    Budgets {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to a CSV file ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    match cmd {
        ReportCommands::Dashboard { month, output } => {
            let month = parse_month_or_current(month.as_deref())?;
            let report = DashboardReport::generate(storage, month, settings)?;

            match output {
                Some(path) => {
                    report.export_csv(open_output(&path)?)?;
                    announce_export("Dashboard", &path);
                }
                None => print!("{}", report.format_terminal()),
            }
        }

        ReportCommands::Trend {
            months,
            month,
            output,
        } => {
            let through = parse_month_or_current(month.as_deref())?;
            let months = months.unwrap_or(settings.trend_months);
            let report = TrendReport::generate(storage, through, months)?;

            match output {
                Some(path) => {
                    report.export_csv(open_output(&path)?)?;
                    announce_export("Trend report", &path);
                }
                None => print!("{}", report.format_terminal(&settings.currency_symbol)),
            }
        }

        ReportCommands::Budgets { month, output } => {
            let month = parse_month_or_current(month.as_deref())?;
            let report = BudgetReport::generate(storage, month, settings)?;

            match output {
                Some(path) => {
                    report.export_csv(open_output(&path)?)?;
                    announce_export("Budget report", &path);
                }
                None => print!("{}", report.format_terminal()),
            }
        }
    }

    Ok(())
}

/// Confirm a file export; nothing is printed for stdout
fn announce_export(name: &str, path: &std::path::Path) {
    if path.as_os_str() != "-" {
        println!("{} exported to: {}", name, path.display());
    }
}
