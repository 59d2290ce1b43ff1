//! Core business logic for Prorata.
//!
//! This crate contains pure business logic with ZERO storage or presentation
//! dependencies. Budgets come in through the [`budget::BudgetRepository`]
//! trait; everything else is calculation.
//!
//! # Modules
//!
//! - `calendar` - Fixed reference calendar and whole-day date arithmetic
//! - `budget` - Monthly budget records and the proration engine
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use prorata_core::budget::{BudgetRecord, InMemoryBudgetRepository, ProrationEngine};
//!
//! let repo = InMemoryBudgetRepository::new(vec![
//!     BudgetRecord::new("202308", dec!(31)),
//!     BudgetRecord::new("202309", dec!(300)),
//! ]);
//! let engine = ProrationEngine::new(Arc::new(repo));
//!
//! let start = NaiveDate::from_ymd_opt(2023, 8, 31).unwrap();
//! let end = NaiveDate::from_ymd_opt(2023, 9, 2).unwrap();
//! assert_eq!(engine.total_amount(start, end), dec!(21));
//! ```

pub mod budget;
pub mod calendar;
