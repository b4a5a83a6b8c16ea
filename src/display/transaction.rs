//! Transaction display formatting
//!
//! Formats transactions as a table and as a detail view.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::truncate;
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Category name for display
fn category_label(txn: &Transaction) -> &str {
    txn.category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("(uncategorized)")
}

/// Signed amount: expenses negative, income positive
fn signed_amount(txn: &Transaction, currency_symbol: &str) -> String {
    let amount = txn.amount.format_with_symbol(currency_symbol);
    if txn.is_expense() {
        format!("-{}", amount)
    } else {
        format!("+{}", amount)
    }
}

/// Format transactions as a table
pub fn format_transaction_table(
    transactions: &[Transaction],
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format(date_format).to_string(),
        kind: txn.kind.to_string(),
        category: category_label(txn).to_string(),
        description: truncate(txn.description_str(), 32),
        amount: signed_amount(txn, currency_symbol),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        signed_amount(txn, currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", category_label(txn)));

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}
