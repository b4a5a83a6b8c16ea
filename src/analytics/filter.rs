//! Transaction filtering
//!
//! Every field of [`TransactionFilter`] is an independent predicate; a
//! transaction is kept only when all active predicates match.

use chrono::NaiveDate;

use crate::models::{CategoryId, Money, Transaction, TransactionKind};

/// Options for filtering transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    /// Income or expense only
    pub kind: Option<TransactionKind>,
    /// A single category
    pub category_id: Option<CategoryId>,
    /// Inclusive lower date bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub date_to: Option<NaiveDate>,
    /// Inclusive lower amount bound
    pub min_amount: Option<Money>,
    /// Inclusive upper amount bound
    pub max_amount: Option<Money>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by description text
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter by transaction kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by category
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Filter by amount range
    pub fn amount_range(mut self, min: Money, max: Money) -> Self {
        self.min_amount = Some(min);
        self.max_amount = Some(max);
        self
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.kind.is_none()
            && self.category_id.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
    }

    /// Check a single transaction against every active predicate
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_with_term(txn, self.search_term().as_deref())
    }

    fn matches_with_term(&self, txn: &Transaction, term: Option<&str>) -> bool {
        if let Some(term) = term {
            match &txn.description {
                Some(description) if description.to_lowercase().contains(term) => {}
                _ => return false,
            }
        }
        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }
        if self.category_id.is_some() && txn.category_id != self.category_id {
            return false;
        }
        if self.date_from.is_some_and(|from| txn.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| txn.date > to) {
            return false;
        }
        if self.min_amount.is_some_and(|min| txn.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| txn.amount > max) {
            return false;
        }
        true
    }

    /// Matching transactions, in input order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let term = self.search_term();
        transactions
            .iter()
            .filter(|t| self.matches_with_term(t, term.as_deref()))
            .cloned()
            .collect()
    }
}
