//! Budget error types.

use thiserror::Error;

/// Errors raised while parsing a budget period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Period string is not `YYYYMM` or `YYYY-MM`.
    #[error("Invalid period format: {0:?} (expected YYYYMM)")]
    InvalidFormat(String),

    /// Month is outside 1-12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Year is outside the supported range.
    #[error("Year out of range: {0}")]
    YearOutOfRange(i32),
}
