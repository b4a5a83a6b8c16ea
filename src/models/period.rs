//! Calendar periods: budget months and inclusive date ranges

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, the period a budget applies to
///
/// Serialized as the first day of the month (`2025-01-01`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "NaiveDate", from = "NaiveDate")]
pub struct Month {
    /// Always the first day of the month
    start: NaiveDate,
}

impl Month {
    /// Create a month
    ///
    /// Returns `None` for a month number outside 1-12, or when the month or
    /// the one after it cannot be represented as calendar dates.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        start.checked_add_months(Months::new(1))?;
        Some(Self { start })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: date - Days::new(u64::from(date.day0())),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        // Only the last month chrono can represent lacks a successor, and it
        // ends on NaiveDate::MAX.
        self.start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The whole month as an inclusive date range
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date(),
            end: self.end_date(),
        }
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month, if it is representable
    pub fn next(&self) -> Option<Self> {
        self.start
            .checked_add_months(Months::new(1))
            .map(|start| Self { start })
    }

    /// The preceding month, if it is representable
    pub fn prev(&self) -> Option<Self> {
        self.start
            .checked_sub_months(Months::new(1))
            .map(|start| Self { start })
    }

    /// Short English label, e.g. "Jan"
    pub fn short_name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        NAMES[self.start.month0() as usize]
    }

    /// Parse a month string
    ///
    /// Formats:
    /// - "2025-01"
    /// - "2025-01-15" (normalized to the containing month)
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::containing(date));
        }

        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Self::new(year, month).ok_or(PeriodParseError::YearOutOfRange(year))
    }
}

impl From<Month> for NaiveDate {
    fn from(month: Month) -> Self {
        month.start
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Month::containing(date)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; fails when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodParseError> {
        if start > end {
            return Err(PeriodParseError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day of the range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Parse "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Parse a zero-padded ISO date (`YYYY-MM-DD`)
pub fn parse_date(s: &str) -> Result<NaiveDate, PeriodParseError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PeriodParseError::InvalidDate(s.to_string()))
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
    InvalidDate(String),
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
            Self::InvalidDate(s) => write!(f, "Invalid date (expected YYYY-MM-DD): {}", s),
            Self::InvertedRange { start, end } => {
                write!(f, "Range start {} is after end {}", start, end)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
