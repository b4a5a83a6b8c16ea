//! Transaction model
//!
//! A transaction is a single income or expense record. Amounts are always
//! non-negative; the direction comes from [`TransactionKind`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::CategorySnapshot;
use super::ids::{CategoryId, TransactionId, UserId};
use super::money::Money;

/// Direction of a transaction (and classification of a category)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Invalid transaction type '{}' (expected income or expense)",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owner of the transaction
    pub user_id: UserId,

    /// Category (None if uncategorized)
    pub category_id: Option<CategoryId>,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Amount, never negative
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,

    /// Transaction date
    pub date: NaiveDate,

    /// Category as seen at read time; attached by the store, never persisted
    #[serde(default, skip_serializing)]
    pub category: Option<CategorySnapshot>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(user_id: UserId, kind: TransactionKind, amount: Money, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            user_id,
            category_id: None,
            kind,
            amount,
            description: None,
            date,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction with all common fields
    pub fn with_details(
        user_id: UserId,
        kind: TransactionKind,
        amount: Money,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        description: Option<String>,
    ) -> Self {
        let mut txn = Self::new(user_id, kind, amount, date);
        txn.category_id = category_id;
        txn.description = description.filter(|d| !d.trim().is_empty());
        txn
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Description or an empty string
    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Validate the stored shape of the transaction
    ///
    /// Zero amounts pass here so that legacy records still load; services
    /// require a strictly positive amount on create and update.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        if let Some(snapshot) = &self.category {
            if snapshot.kind != self.kind {
                return Err(TransactionValidationError::CategoryKindMismatch {
                    transaction: self.kind,
                    category: snapshot.kind,
                });
            }
        }

        if self.description.as_ref().is_some_and(|d| d.len() > 255) {
            return Err(TransactionValidationError::DescriptionTooLong);
        }

        Ok(())
    }

    /// Validation applied to new and edited transactions
    pub fn validate_for_write(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        self.validate()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense() { "-" } else { "+" };
        write!(
            f,
            "{} {}{} {}",
            self.date.format("%Y-%m-%d"),
            sign,
            self.amount,
            self.description_str()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    CategoryKindMismatch {
        transaction: TransactionKind,
        category: TransactionKind,
    },
    DescriptionTooLong,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Transaction amount cannot be negative: {}", amount)
            }
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be greater than zero: {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Transaction amount too large: {}", amount)
            }
            Self::CategoryKindMismatch {
                transaction,
                category,
            } => write!(
                f,
                "Cannot assign an {} category to an {} transaction",
                category, transaction
            ),
            Self::DescriptionTooLong => {
                write!(f, "Transaction description too long (max 255 chars)")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let user = UserId::new();
        let txn = Transaction::new(
            user,
            TransactionKind::Expense,
            Money::from_cents(4250),
            date(2025, 1, 15),
        );

        assert_eq!(txn.user_id, user);
        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert!(txn.category_id.is_none());
        assert!(txn.validate_for_write().is_ok());
    }

    #[test]
    fn test_blank_description_is_none() {
        let txn = Transaction::with_details(
            UserId::new(),
            TransactionKind::Income,
            Money::from_units(10),
            date(2025, 1, 1),
            None,
            Some("   ".into()),
        );
        assert!(txn.description.is_none());
        assert_eq!(txn.description_str(), "");
    }

    #[test]
    fn test_amount_validation() {
        let mut txn = Transaction::new(
            UserId::new(),
            TransactionKind::Expense,
            Money::zero(),
            date(2025, 1, 1),
        );
        assert!(txn.validate().is_ok());
        assert!(matches!(
            txn.validate_for_write(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        txn.amount = Money::from_cents(-1);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(_))
        ));

        txn.amount = Money::MAX_AMOUNT;
        assert!(txn.validate_for_write().is_ok());
        txn.amount = Money::MAX_AMOUNT + Money::from_cents(1);
        assert!(matches!(
            txn.validate_for_write(),
            Err(TransactionValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn test_category_kind_mismatch() {
        let user = UserId::new();
        let salary = Category::new(user, "Salary", TransactionKind::Income);
        let mut txn = Transaction::new(
            user,
            TransactionKind::Expense,
            Money::from_units(5),
            date(2025, 1, 1),
        );
        txn.category_id = Some(salary.id);
        txn.category = Some(salary.snapshot());

        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::CategoryKindMismatch { .. })
        ));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Income".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!("expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_serialization_skips_snapshot() {
        let user = UserId::new();
        let category = Category::new(user, "Food", TransactionKind::Expense);
        let mut txn = Transaction::with_details(
            user,
            TransactionKind::Expense,
            Money::from_cents(1999),
            date(2025, 2, 3),
            Some(category.id),
            Some("Lunch".into()),
        );
        txn.category = Some(category.snapshot());

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        assert!(json.contains("\"date\":\"2025-02-03\""));
        assert!(!json.contains("\"category\":"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, txn.id);
        assert_eq!(back.amount, txn.amount);
        assert!(back.category.is_none());
    }
}
