//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Largest absolute UTC offset a fixed-offset calendar accepts, in seconds.
pub const MAX_UTC_OFFSET_SECONDS: i32 = 86_399;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reference calendar configuration.
    pub calendar: CalendarConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Monthly budget allocations.
    pub budgets: Vec<BudgetEntry>,
}

/// Reference calendar configuration.
///
/// All day boundaries are evaluated in a single fixed offset, so results do
/// not depend on the host's local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CalendarConfig {
    /// Offset from UTC in seconds. Zero keeps the calendar on UTC.
    #[serde(default)]
    pub utc_offset_seconds: i32,
    /// Month length assumed when a budget period cannot be parsed.
    #[serde(default = "default_fallback_days_in_month")]
    pub fallback_days_in_month: u32,
}

fn default_fallback_days_in_month() -> u32 {
    30
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_seconds: 0,
            fallback_days_in_month: default_fallback_days_in_month(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "prorata=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// A configured monthly budget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BudgetEntry {
    /// Year and month, e.g. `"202308"`.
    pub period: String,
    /// Total budget for the whole month.
    pub amount: Decimal,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Reads `config/default` and `config/{RUN_MODE}`, then `PRORATA__*`
    /// environment variables.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_from("config", &run_mode)
    }

    /// Loads configuration from the given directory and run mode.
    pub fn load_from(dir: &str, run_mode: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PRORATA").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks values that deserialization alone cannot rule out.
    pub fn validate(&self) -> AppResult<()> {
        self.calendar.validate()?;

        for entry in &self.budgets {
            if entry.amount < Decimal::ZERO {
                return Err(AppError::Validation(format!(
                    "budget for {} has negative amount {}",
                    entry.period, entry.amount
                )));
            }
        }

        Ok(())
    }
}

impl CalendarConfig {
    /// Checks the offset and fallback month length are usable.
    pub fn validate(&self) -> AppResult<()> {
        if self.utc_offset_seconds.abs() > MAX_UTC_OFFSET_SECONDS {
            return Err(AppError::Configuration(format!(
                "calendar.utc_offset_seconds must be within ±{MAX_UTC_OFFSET_SECONDS}, got {}",
                self.utc_offset_seconds
            )));
        }

        if !(28..=31).contains(&self.fallback_days_in_month) {
            return Err(AppError::Configuration(format!(
                "calendar.fallback_days_in_month must be between 28 and 31, got {}",
                self.fallback_days_in_month
            )));
        }

        Ok(())
    }
}
