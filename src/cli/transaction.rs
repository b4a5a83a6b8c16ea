//! Transaction CLI commands
//!
//! Add, list, edit and delete transactions. `list` exposes every filter
//! field of [`TransactionFilter`].

use chrono::Local;
use clap::Subcommand;

use super::args::{parse_date_arg, parse_kind, parse_money, parse_month_or_current};
use crate::analytics::TransactionFilter;
use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_table};
use crate::error::FinanceResult;
use crate::services::{CategoryService, CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount, e.g. "42.50"
        amount: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List transactions
    List {
        /// Case-insensitive text to find in descriptions
        #[arg(short, long)]
        search: Option<String>,
        /// Only income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Earliest date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,
        /// A whole month (YYYY-MM); overrides --from/--to
        #[arg(long)]
        month: Option<String>,
        /// Smallest amount (inclusive)
        #[arg(long)]
        min: Option<String>,
        /// Largest amount (inclusive)
        #[arg(long)]
        max: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category name or ID
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        clear_category: bool,
        /// New description (empty to clear)
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            kind,
            category,
            date,
            description,
        } => {
            let category_id = match category {
                Some(c) => Some(categories.require(&c)?.id),
                None => None,
            };
            let date = match date {
                Some(d) => parse_date_arg(&d)?,
                None => Local::now().date_naive(),
            };

            let txn = service.create(CreateTransactionInput {
                kind: parse_kind(&kind)?,
                amount: parse_money(&amount)?,
                date,
                category_id,
                description,
            })?;

            println!("Added transaction: {}", txn.id);
            print!(
                "{}",
                format_transaction_details(&txn, &settings.currency_symbol)
            );
        }

        TransactionCommands::List {
            search,
            kind,
            category,
            from,
            to,
            month,
            min,
            max,
            limit,
        } => {
            let mut filter = TransactionFilter::new();

            if let Some(term) = search {
                filter = filter.search(term);
            }
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(c) = category {
                filter = filter.category(categories.require(&c)?.id);
            }

            if let Some(month) = month {
                let month = parse_month_or_current(Some(&month))?;
                filter.date_from = Some(month.start_date());
                filter.date_to = Some(month.end_date());
            } else {
                filter.date_from = from.as_deref().map(parse_date_arg).transpose()?;
                filter.date_to = to.as_deref().map(parse_date_arg).transpose()?;
            }

            filter.min_amount = min.as_deref().map(parse_money).transpose()?;
            filter.max_amount = max.as_deref().map(parse_money).transpose()?;

            let transactions = service.list(&filter, Some(limit))?;
            println!(
                "{}",
                format_transaction_table(
                    &transactions,
                    &settings.currency_symbol,
                    &settings.date_format
                )
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(&id)?;
            print!(
                "{}",
                format_transaction_details(&txn, &settings.currency_symbol)
            );
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            date,
            category,
            clear_category,
            description,
        } => {
            let txn = service.require(&id)?;

            let category_id = if clear_category {
                Some(None)
            } else {
                match category {
                    Some(c) => Some(Some(categories.require(&c)?.id)),
                    None => None,
                }
            };

            if kind.is_none()
                && amount.is_none()
                && date.is_none()
                && category_id.is_none()
                && description.is_none()
            {
                println!(
                    "No changes specified. Use --type, --amount, --date, --category, \
                     --clear-category, or --description."
                );
                return Ok(());
            }

            let updated = service.update(
                txn.id,
                kind.as_deref().map(parse_kind).transpose()?,
                amount.as_deref().map(parse_money).transpose()?,
                date.as_deref().map(parse_date_arg).transpose()?,
                category_id,
                description,
            )?;

            println!("Updated transaction: {}", updated.id);
            print!(
                "{}",
                format_transaction_details(&updated, &settings.currency_symbol)
            );
        }

        TransactionCommands::Delete { id } => {
            let txn = service.require(&id)?;
            service.delete(txn.id)?;
            println!("Deleted transaction: {}", txn);
        }
    }

    Ok(())
}
