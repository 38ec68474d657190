//! Billing period handling.
//!
//! A period identifies one monthly settlement cycle. Its canonical key is
//! the ISO `"YYYY-MM"` string, which sorts lexicographically in calendar
//! order; prior-settlement lookups rely on that property.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use std::fmt;

/// One monthly billing cycle, e.g. March 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period, validating that the month is in 1-12.
    ///
    /// # Errors
    /// Returns `Error::Validation` for an out-of-range month.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Validation {
                message: format!("month must be between 1 and 12, got {month}"),
            });
        }
        Ok(Self { year, month })
    }

    /// The period's year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The period's month (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First and last calendar day of the period, both inclusive.
    ///
    /// The last day is obtained as the day before the first day of the
    /// following month, so leap years and 30/31-day months come out right.
    ///
    /// # Errors
    /// Returns `Error::Validation` if the year is outside the range
    /// representable by `NaiveDate`.
    pub fn day_bounds(self) -> Result<(NaiveDate, NaiveDate)> {
        let invalid = || Error::Validation {
            message: format!("period {self} is out of the representable date range"),
        };

        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(invalid)?;
        let last = next_first.pred_opt().ok_or_else(invalid)?;

        Ok((first, last))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
