//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use super::args::parse_kind;
use crate::display::category::{format_category_details, format_category_table};
use crate::error::FinanceResult;
use crate::services::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only income or expense categories
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Hex color, e.g. #22c55e
        #[arg(short, long)]
        color: Option<String>,
        /// Icon name
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New hex color
        #[arg(short, long)]
        color: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Delete a category; its transactions become uncategorized
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FinanceResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let categories = match kind {
                Some(kind) => service.list_by_kind(parse_kind(&kind)?)?,
                None => service.list()?,
            };
            println!("{}", format_category_table(&categories));
        }

        CategoryCommands::Create {
            name,
            kind,
            color,
            icon,
        } => {
            let category = service.create(CreateCategoryInput {
                name,
                kind: parse_kind(&kind)?,
                color,
                icon,
            })?;

            println!("Created category: {}", category.name);
            println!("  Type: {}", category.kind);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let cat = service.require(&category)?;
            print!("{}", format_category_details(&cat));
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            color,
            icon,
        } => {
            let cat = service.require(&category)?;

            if name.is_none() && kind.is_none() && color.is_none() && icon.is_none() {
                println!("No changes specified. Use --name, --type, --color, or --icon.");
                return Ok(());
            }

            let updated = service.update(
                cat.id,
                UpdateCategoryInput {
                    name,
                    kind: kind.as_deref().map(parse_kind).transpose()?,
                    color,
                    icon,
                },
            )?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let cat = service.require(&category)?;
            let deletion = service.delete(cat.id)?;

            println!("Deleted category: {}", deletion.category.name);
            if deletion.transactions_unassigned > 0 {
                println!(
                    "  {} transaction(s) are now uncategorized",
                    deletion.transactions_unassigned
                );
            }
            if deletion.budgets_removed > 0 {
                println!("  {} budget(s) removed", deletion.budgets_removed);
            }
        }
    }

    Ok(())
}
