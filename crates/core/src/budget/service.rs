//! Proration engine: budget totals over arbitrary date ranges.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::period::YearMonth;
use super::repository::BudgetRepository;
use super::types::{BudgetRecord, MonthlyContribution};
use crate::calendar::{DateRange, IntoCalendarDay, ReferenceCalendar};

/// Computes the budget attributable to a date range from monthly budgets.
///
/// Holds no state between calls; every call reads a fresh snapshot from the
/// repository.
pub struct ProrationEngine<R: BudgetRepository> {
    repo: Arc<R>,
    calendar: ReferenceCalendar,
}

impl<R: BudgetRepository> ProrationEngine<R> {
    /// Create an engine evaluating days in UTC.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_calendar(repo, ReferenceCalendar::utc())
    }

    /// Create an engine evaluating days in the given calendar.
    #[must_use]
    pub const fn with_calendar(repo: Arc<R>, calendar: ReferenceCalendar) -> Self {
        Self { repo, calendar }
    }

    /// The calendar day boundaries are evaluated in.
    #[must_use]
    pub const fn calendar(&self) -> &ReferenceCalendar {
        &self.calendar
    }

    /// Total budget for `start..=end`.
    ///
    /// Both ends are reduced to calendar days and counted. Returns zero when
    /// `start` is after `end` or when no month in the range has a budget. The
    /// result is not rounded.
    pub fn total_amount<S, E>(&self, start: S, end: E) -> Decimal
    where
        S: IntoCalendarDay,
        E: IntoCalendarDay,
    {
        self.breakdown(start, end)
            .iter()
            .map(|contribution| contribution.amount)
            .sum()
    }

    /// Per-month contributions to the total for `start..=end`, in
    /// chronological order.
    ///
    /// Each budgeted month overlapping the range contributes its daily rate
    /// times the days of its window. Windows follow the month's position
    /// among the overlapping budgets: a lone budget takes `start..=end`, the
    /// first runs from `start` to its last day, the last from its first day
    /// to `end`, and every budget in between takes its whole month. Days in
    /// unbudgeted months at either end therefore go to the first or last
    /// budget, even one with a zero amount.
    pub fn breakdown<S, E>(&self, start: S, end: E) -> Vec<MonthlyContribution>
    where
        S: IntoCalendarDay,
        E: IntoCalendarDay,
    {
        let start = self.calendar.calendar_day(start);
        let end = self.calendar.calendar_day(end);

        let Some(requested) = DateRange::new(start, end) else {
            debug!(%start, %end, "start is after end, nothing to prorate");
            return Vec::new();
        };

        let mut candidates = self.overlapping_months(requested);
        if candidates.is_empty() {
            debug!(%requested, "no budget overlaps the requested range");
            return Vec::new();
        }

        // Stable, so duplicate periods keep repository order.
        candidates.sort_by_key(|(period, _)| *period);

        let last = candidates.len() - 1;
        let contributions: Vec<MonthlyContribution> = candidates
            .iter()
            .enumerate()
            .filter_map(|(position, (period, record))| {
                let window = Self::window(*period, position == 0, position == last, requested)?;
                Some(self.contribution(*period, record, window))
            })
            .collect();

        debug!(%requested, months = contributions.len(), "prorated budget");
        contributions
    }

    fn overlapping_months(&self, requested: DateRange) -> Vec<(YearMonth, BudgetRecord)> {
        self.repo
            .get_all()
            .into_iter()
            .filter_map(|record| match record.year_month() {
                Ok(period) => period
                    .range()
                    .overlaps(&requested)
                    .then_some((period, record)),
                Err(err) => {
                    warn!(period = %record.period, error = %err, "skipping budget with unparseable period");
                    None
                }
            })
            .collect()
    }

    /// Window for a budget month, trimmed to the request only where the
    /// month is the first or last overlapping budget.
    fn window(
        period: YearMonth,
        is_first: bool,
        is_last: bool,
        requested: DateRange,
    ) -> Option<DateRange> {
        let start = if is_first {
            requested.start()
        } else {
            period.first_day()
        };
        let end = if is_last {
            requested.end()
        } else {
            period.last_day()
        };
        DateRange::new(start, end)
    }

    fn contribution(
        &self,
        period: YearMonth,
        record: &BudgetRecord,
        window: DateRange,
    ) -> MonthlyContribution {
        let days = window.days();

        MonthlyContribution {
            period,
            window,
            days,
            daily_rate: record.daily_rate(&self.calendar),
            amount: record.prorated_amount(days, &self.calendar),
        }
    }
}
