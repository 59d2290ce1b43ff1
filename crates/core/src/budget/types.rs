//! Budget data types.

use chrono::NaiveDate;
use prorata_shared::BudgetEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::PeriodError;
use super::period::YearMonth;
use crate::calendar::{DateRange, ReferenceCalendar};

/// One month's total budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Year and month the budget applies to, e.g. `"202308"`.
    pub period: String,
    /// Budgeted amount for the whole month.
    pub amount: Decimal,
}

impl BudgetRecord {
    /// Creates a budget record.
    #[must_use]
    pub fn new(period: impl Into<String>, amount: Decimal) -> Self {
        Self {
            period: period.into(),
            amount,
        }
    }

    /// Parses the record's period.
    pub fn year_month(&self) -> Result<YearMonth, PeriodError> {
        self.period.parse()
    }

    /// Number of days in the record's month.
    ///
    /// Falls back to the calendar's fallback month length when the period
    /// cannot be parsed.
    pub fn days_in_month(&self, calendar: &ReferenceCalendar) -> u32 {
        self.year_month().map_or_else(
            |err| {
                warn!(period = %self.period, error = %err, "unparseable budget period, assuming fallback month length");
                calendar.fallback_days_in_month()
            },
            YearMonth::days_in_month,
        )
    }

    /// First day of the record's month.
    ///
    /// An unparseable period is anchored to the current month.
    pub fn first_day_of_period(&self, calendar: &ReferenceCalendar) -> NaiveDate {
        self.month_or_current(calendar).first_day()
    }

    /// Last day of the record's month.
    ///
    /// An unparseable period is anchored to the current month.
    pub fn last_day_of_period(&self, calendar: &ReferenceCalendar) -> NaiveDate {
        self.month_or_current(calendar).last_day()
    }

    /// Budget per day of the month.
    pub fn daily_rate(&self, calendar: &ReferenceCalendar) -> Decimal {
        self.amount / Decimal::from(self.days_in_month(calendar))
    }

    /// Budget attributable to `days` days of the month.
    ///
    /// Multiplies before dividing so that a whole month returns `amount`
    /// exactly.
    pub fn prorated_amount(&self, days: i64, calendar: &ReferenceCalendar) -> Decimal {
        let days_in_month = Decimal::from(self.days_in_month(calendar));
        let days = Decimal::from(days);

        self.amount
            .checked_mul(days)
            .and_then(|total| total.checked_div(days_in_month))
            .unwrap_or_else(|| self.daily_rate(calendar) * days)
    }

    fn month_or_current(&self, calendar: &ReferenceCalendar) -> YearMonth {
        self.year_month().unwrap_or_else(|err| {
            warn!(period = %self.period, error = %err, "unparseable budget period, anchoring to current month");
            YearMonth::containing(calendar.today())
        })
    }
}

impl From<BudgetEntry> for BudgetRecord {
    fn from(entry: BudgetEntry) -> Self {
        Self::new(entry.period, entry.amount)
    }
}

/// The share of one month's budget falling inside a requested range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyContribution {
    /// Month the contribution comes from.
    pub period: YearMonth,
    /// Days of the month inside the requested range.
    pub window: DateRange,
    /// Number of days in `window`.
    pub days: i64,
    /// Budget per day of the month.
    pub daily_rate: Decimal,
    /// Budget attributed to `window`.
    pub amount: Decimal,
}
