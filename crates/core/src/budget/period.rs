//! Year-month budget periods.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;
use crate::calendar::{self, DateRange};

/// Earliest year a period may name.
pub const MIN_YEAR: i32 = 1;
/// Latest year a period may name.
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, e.g. `202308` for August 2023.
///
/// Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Creates a period for the given year and month.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PeriodError::YearOutOfRange(year));
        }

        calendar::first_day_of_month(year, month)
            .map(|first_day| Self { first_day })
            .ok_or(PeriodError::YearOutOfRange(year))
    }

    /// The period a date falls in.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    /// Month of the year, 1-12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        // Years stop at 9999, so the following month always exists.
        calendar::last_day_of_month(self.year(), self.month()).unwrap_or(self.first_day)
    }

    /// Number of days in the month (28-31).
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    /// The whole month as a date range.
    #[must_use]
    pub fn range(self) -> DateRange {
        DateRange::new(self.first_day, self.last_day())
            .unwrap_or_else(|| DateRange::single_day(self.first_day))
    }

    /// The following month, if still in range.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::new(year, month).ok()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !trimmed.is_ascii() {
            return Err(PeriodError::InvalidFormat(s.to_string()));
        }

        let (year, month) = match trimmed.len() {
            6 => (&trimmed[..4], &trimmed[4..]),
            7 if trimmed.as_bytes()[4] == b'-' => (&trimmed[..4], &trimmed[5..]),
            _ => return Err(PeriodError::InvalidFormat(s.to_string())),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year) || !all_digits(month) {
            return Err(PeriodError::InvalidFormat(s.to_string()));
        }

        let year = year
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
        let month = month
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(period: YearMonth) -> Self {
        period.to_string()
    }
}
