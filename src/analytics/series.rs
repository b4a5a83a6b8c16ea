//! Income/expense series over caller-supplied time buckets

use chrono::NaiveDate;

use crate::error::FinanceResult;
use crate::models::{DateRange, Money, Month, Transaction};

use super::totals::{add_amount, ensure_valid_amount};

/// A labelled time window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub range: DateRange,
}

impl Bucket {
    pub fn new(label: impl Into<String>, range: DateRange) -> Self {
        Self {
            label: label.into(),
            range,
        }
    }

    /// A bucket covering one calendar month
    pub fn month(month: Month) -> Self {
        Self::new(format!("{} {}", month.short_name(), month.year()), month.range())
    }

    /// A bucket covering one day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date.format("%m-%d").to_string(), DateRange::day(date))
    }
}

/// Income and expenses within one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Money,
    pub expenses: Money,
}

impl SeriesPoint {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// The `count` months ending at `last`, oldest first
///
/// Stops early at the first month the calendar cannot represent.
pub fn monthly_buckets(last: Month, count: usize) -> Vec<Bucket> {
    let mut months: Vec<Month> = std::iter::successors(Some(last), Month::prev)
        .take(count)
        .collect();
    months.reverse();
    months.into_iter().map(Bucket::month).collect()
}

/// One bucket per day of `range`
pub fn daily_buckets(range: DateRange) -> Vec<Bucket> {
    range.days().map(Bucket::day).collect()
}

/// Sum income and expenses per bucket
///
/// Each bucket is computed independently by date containment, so a
/// transaction is counted in every bucket whose range includes its date.
/// Output order follows `buckets`.
pub fn compute_time_series(
    transactions: &[Transaction],
    buckets: &[Bucket],
) -> FinanceResult<Vec<SeriesPoint>> {
    for txn in transactions {
        ensure_valid_amount(txn)?;
    }

    buckets
        .iter()
        .map(|bucket| {
            let mut income = Money::zero();
            let mut expenses = Money::zero();
            for txn in transactions.iter().filter(|t| bucket.range.contains(t.date)) {
                if txn.is_income() {
                    income = add_amount(income, txn.amount)?;
                } else {
                    expenses = add_amount(expenses, txn.amount)?;
                }
            }
            Ok(SeriesPoint {
                label: bucket.label.clone(),
                start: bucket.range.start,
                end: bucket.range.end,
                income,
                expenses,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionKind, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: TransactionKind, cents: i64, on: NaiveDate) -> Transaction {
        Transaction::new(UserId::new(), kind, Money::from_cents(cents), on)
    }

    #[test]
    fn test_monthly_buckets_oldest_first() {
        let buckets = monthly_buckets(Month::new(2025, 2).unwrap(), 3);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Dec 2024", "Jan 2025", "Feb 2025"]);
        assert_eq!(buckets[0].range.start, date(2024, 12, 1));
        assert_eq!(buckets[2].range.end, date(2025, 2, 28));
    }

    #[test]
    fn test_monthly_buckets_zero_count() {
        assert!(monthly_buckets(Month::new(2025, 2).unwrap(), 0).is_empty());
    }

    #[test]
    fn test_daily_buckets() {
        let buckets = daily_buckets(Month::new(2025, 2).unwrap().range());
        assert_eq!(buckets.len(), 28);
        assert_eq!(buckets[0].label, "02-01");
        assert_eq!(buckets[27].range, DateRange::day(date(2025, 2, 28)));
    }

    #[test]
    fn test_series_sums_per_bucket() {
        let transactions = vec![
            txn(TransactionKind::Income, 300_000, date(2025, 1, 1)),
            txn(TransactionKind::Expense, 1_000, date(2025, 1, 31)),
            txn(TransactionKind::Expense, 2_000, date(2025, 2, 1)),
            txn(TransactionKind::Income, 5_000, date(2025, 3, 15)),
        ];
        let buckets = monthly_buckets(Month::new(2025, 2).unwrap(), 2);

        let series = compute_time_series(&transactions, &buckets).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Jan 2025");
        assert_eq!(series[0].income, Money::from_cents(300_000));
        assert_eq!(series[0].expenses, Money::from_cents(1_000));
        assert_eq!(series[1].income, Money::zero());
        assert_eq!(series[1].expenses, Money::from_cents(2_000));
        assert_eq!(series[1].net(), Money::from_cents(-2_000));
    }

    #[test]
    fn test_series_preserves_bucket_order() {
        let transactions = vec![txn(TransactionKind::Expense, 100, date(2025, 1, 2))];
        let buckets = vec![
            Bucket::day(date(2025, 1, 3)),
            Bucket::day(date(2025, 1, 1)),
            Bucket::day(date(2025, 1, 2)),
        ];

        let series = compute_time_series(&transactions, &buckets).unwrap();
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["01-03", "01-01", "01-02"]);
        assert_eq!(series[2].expenses, Money::from_cents(100));
        assert!(series[0].expenses.is_zero());
    }

    #[test]
    fn test_overlapping_buckets_count_independently() {
        let transactions = vec![txn(TransactionKind::Income, 700, date(2025, 1, 15))];
        let jan = Month::new(2025, 1).unwrap();
        let buckets = vec![Bucket::month(jan), Bucket::day(date(2025, 1, 15))];

        let series = compute_time_series(&transactions, &buckets).unwrap();
        assert_eq!(series[0].income, Money::from_cents(700));
        assert_eq!(series[1].income, Money::from_cents(700));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compute_time_series(&[], &[]).unwrap().is_empty());
        let buckets = monthly_buckets(Month::new(2025, 1).unwrap(), 6);
        let series = compute_time_series(&[], &buckets).unwrap();
        assert_eq!(series.len(), 6);
        assert!(series.iter().all(|p| p.income.is_zero() && p.expenses.is_zero()));
    }
}
