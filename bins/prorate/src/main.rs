//! Prorata budget calculator.
//!
//! Usage:
//!   prorate <START> <END>              - Print the budget for START..=END
//!   prorate <START> <END> --breakdown  - Also print each month's share
//!
//! Dates are `YYYY-MM-DD` or `YYYYMMDD`. Monthly budgets are read from
//! configuration (`config/default.toml`, `config/{RUN_MODE}.toml` and
//! `PRORATA__*` environment variables).

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use prorata_core::budget::{InMemoryBudgetRepository, MonthlyContribution, ProrationEngine};
use prorata_core::calendar::ReferenceCalendar;
use prorata_shared::{AppConfig, AppError, AppResult, LoggingConfig};

const USAGE: &str = "usage: prorate <START> <END> [--breakdown]";

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Prorate {
        start: NaiveDate,
        end: NaiveDate,
        breakdown: bool,
    },
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            error!(error = %err, "prorate failed");
            eprintln!("prorate: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run() -> anyhow::Result<()> {
    // Logging comes up before anything can fail, so errors reach the subscriber.
    let config = AppConfig::load();
    match &config {
        Ok(config) => init_tracing(&config.logging),
        Err(_) => init_tracing(&LoggingConfig::default()),
    }
    let config = config.context("loading configuration")?;

    let command = parse_args(std::env::args().skip(1))?;
    let Command::Prorate {
        start,
        end,
        breakdown,
    } = command
    else {
        println!("{USAGE}");
        return Ok(());
    };

    let calendar = ReferenceCalendar::from_config(&config.calendar)?;
    let repo: InMemoryBudgetRepository = config.budgets.into_iter().collect();
    info!(budgets = repo.len(), %start, %end, "prorating budget");

    let engine = ProrationEngine::with_calendar(Arc::new(repo), calendar);
    let contributions = engine.breakdown(start, end);
    print!("{}", render(&contributions, breakdown));

    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    // Results go to stdout, so logs stay on stderr.
    if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn parse_args<I>(args: I) -> AppResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut dates = Vec::new();
    let mut breakdown = false;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-b" | "--breakdown" => breakdown = true,
            flag if flag.starts_with('-') => {
                return Err(AppError::Validation(format!("unknown option {flag}; {USAGE}")));
            }
            _ => dates.push(parse_date(&arg)?),
        }
    }

    match dates.as_slice() {
        [start, end] => Ok(Command::Prorate {
            start: *start,
            end: *end,
            breakdown,
        }),
        _ => Err(AppError::Validation(format!(
            "expected two dates, got {}; {USAGE}",
            dates.len()
        ))),
    }
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .map_err(|_| AppError::InvalidDate(format!("{value:?} (expected YYYY-MM-DD or YYYYMMDD)")))
}

fn render(contributions: &[MonthlyContribution], breakdown: bool) -> String {
    let total: Decimal = contributions.iter().map(|c| c.amount).sum();

    let mut out = if breakdown {
        contributions
            .iter()
            .map(|c| {
                format!(
                    "{}  {}  {:>2} days x {} = {}\n",
                    c.period,
                    c.window,
                    c.days,
                    c.daily_rate.round_dp(4).normalize(),
                    c.amount.normalize()
                )
            })
            .collect()
    } else {
        String::new()
    };

    out.push_str(&total.normalize().to_string());
    out.push('\n');
    out
}
