//! Argument parsing shared by the command handlers

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::period::parse_date;
use crate::models::{Money, Month, TransactionKind};

/// Parse a money amount argument
pub fn parse_money(value: &str) -> FinanceResult<Money> {
    Money::parse(value)
        .map_err(|e| FinanceError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse an optional `YYYY-MM` argument, defaulting to the current month
pub fn parse_month_or_current(value: Option<&str>) -> FinanceResult<Month> {
    match value {
        Some(s) => Month::parse(s).map_err(|e| {
            FinanceError::Validation(format!("{}. Use YYYY-MM (e.g., 2025-01)", e))
        }),
        None => Ok(Month::current()),
    }
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date_arg(value: &str) -> FinanceResult<NaiveDate> {
    parse_date(value).map_err(|e| FinanceError::Validation(e.to_string()))
}

/// Parse an `income`/`expense` argument
pub fn parse_kind(value: &str) -> FinanceResult<TransactionKind> {
    value.parse().map_err(FinanceError::Validation)
}

/// Open the destination of a CSV export; `-` is stdout
pub fn open_output(path: &Path) -> FinanceResult<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdout().lock()));
    }

    let file = File::create(path).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(Box::new(BufWriter::new(file)))
}
