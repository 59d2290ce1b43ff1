//! Shared errors and configuration for Prorata.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management (reference calendar, logging, budgets)

pub mod config;
pub mod error;

pub use config::{AppConfig, BudgetEntry, CalendarConfig, LoggingConfig};
pub use error::{AppError, AppResult};
