//! Monthly budgets and their proration over date ranges.

pub mod error;
pub mod period;
pub mod repository;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PeriodError;
pub use period::YearMonth;
pub use repository::{BudgetRepository, InMemoryBudgetRepository};
pub use service::ProrationEngine;
pub use types::{BudgetRecord, MonthlyContribution};
