//! Fixed reference calendar and whole-day date arithmetic.
//!
//! Every day boundary is evaluated in one fixed UTC offset (UTC unless
//! configured otherwise), so results never depend on the host's local
//! timezone. The calendar is an immutable value; nothing here holds state.

pub mod range;

use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use prorata_shared::{AppError, AppResult, CalendarConfig};

pub use range::DateRange;

/// Month length assumed when a budget period cannot be parsed.
pub const DEFAULT_FALLBACK_DAYS_IN_MONTH: u32 = 30;

/// The calendar all day-level computation is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCalendar {
    offset: FixedOffset,
    fallback_days_in_month: u32,
}

impl ReferenceCalendar {
    /// Creates a zero-offset (UTC) calendar.
    #[must_use]
    pub fn utc() -> Self {
        Self::with_offset(Utc.fix())
    }

    /// Creates a calendar anchored to the given fixed offset.
    #[must_use]
    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset,
            fallback_days_in_month: DEFAULT_FALLBACK_DAYS_IN_MONTH,
        }
    }

    /// Builds a calendar from configuration.
    pub fn from_config(config: &CalendarConfig) -> AppResult<Self> {
        config.validate()?;

        let offset = FixedOffset::east_opt(config.utc_offset_seconds).ok_or_else(|| {
            AppError::Configuration(format!(
                "invalid UTC offset: {} seconds",
                config.utc_offset_seconds
            ))
        })?;

        Ok(Self {
            offset,
            fallback_days_in_month: config.fallback_days_in_month,
        })
    }

    /// Offset this calendar evaluates day boundaries in.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Month length used for periods that cannot be parsed.
    #[must_use]
    pub const fn fallback_days_in_month(&self) -> u32 {
        self.fallback_days_in_month
    }

    /// Truncates a date or instant to its calendar day in this calendar.
    pub fn calendar_day<D: IntoCalendarDay>(&self, value: D) -> NaiveDate {
        value.into_calendar_day(self.offset)
    }

    /// Today's date in this calendar.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.calendar_day(Utc::now())
    }
}

impl Default for ReferenceCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Values that can be reduced to a whole calendar day.
///
/// Anything finer than a day is discarded.
pub trait IntoCalendarDay {
    /// Returns the calendar day of `self` as seen from `offset`.
    fn into_calendar_day(self, offset: FixedOffset) -> NaiveDate;
}

impl IntoCalendarDay for NaiveDate {
    fn into_calendar_day(self, _offset: FixedOffset) -> NaiveDate {
        self
    }
}

/// Naive date-times carry no zone and are read as reference-calendar wall time.
impl IntoCalendarDay for NaiveDateTime {
    fn into_calendar_day(self, _offset: FixedOffset) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> IntoCalendarDay for DateTime<Tz> {
    fn into_calendar_day(self, offset: FixedOffset) -> NaiveDate {
        self.with_timezone(&offset).date_naive()
    }
}

/// Number of days in the given month, using Gregorian leap-year rules.
///
/// Returns `None` for an invalid month or a year chrono cannot represent.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    last_day_of_month(year, month).map(|last| last.day())
}

/// First day of the given month.
#[must_use]
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of the given month.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    first_day_of_month(year, month)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Days from `start` to `end`, counting both endpoints.
///
/// Zero when `end` is before `start`.
#[must_use]
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    end.signed_duration_since(start).num_days() + 1
}
