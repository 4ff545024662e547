//! Report periods

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{FarmbookError, FarmbookResult};
use crate::models::Record;

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> FarmbookResult<Self> {
        if start > end {
            return Err(FarmbookError::Validation(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// From the first of `today`'s month up to `today`
    pub fn month_to_date(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        Self { start, end: today }
    }

    /// Every representable date
    pub fn all() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a record date falls in the range. Missing dates never do.
    pub fn contains(&self, date: Option<NaiveDateTime>) -> bool {
        date.map(|d| d.date())
            .is_some_and(|d| self.start <= d && d <= self.end)
    }

    /// The rows dated within the range, in their original order
    pub fn filter<R: Record>(&self, rows: &[R]) -> Vec<R> {
        rows.iter()
            .filter(|r| self.contains(r.date()))
            .cloned()
            .collect()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::all() {
            write!(f, "all dates")
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}
