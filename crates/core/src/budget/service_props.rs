//! Property-based tests for the proration engine.
//!
//! - Inverted ranges prorate to zero
//! - Repeated calls agree
//! - Widening a range never lowers the total
//! - Repository order is irrelevant
//! - Whole-month ranges reproduce the budgeted amounts exactly
//!
//! Budgets cover consecutive months. With a gap between two budgets, moving
//! `end` past the gap turns the earlier budget from last into a middle month
//! and its window shrinks back to the month itself.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::period::YearMonth;
use super::repository::InMemoryBudgetRepository;
use super::service::ProrationEngine;
use super::types::BudgetRecord;

/// First day budgets and ranges are generated from.
fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Months after the epoch budgets may fall in (four years, spanning a leap year).
const MONTH_SPAN: u32 = 48;

/// Days after the epoch ranges may start or end on.
const DAY_SPAN: u64 = 1_470;

fn month_at(index: u32) -> YearMonth {
    let mut period = YearMonth::containing(epoch());
    for _ in 0..index {
        period = period.next().unwrap();
    }
    period
}

fn day_at(offset: u64) -> NaiveDate {
    epoch().checked_add_days(Days::new(offset)).unwrap()
}

/// Strategy to generate non-negative amounts (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate budgets for a run of consecutive months.
fn budgets() -> impl Strategy<Value = Vec<BudgetRecord>> {
    (0..MONTH_SPAN, prop::collection::vec(amount(), 0..24)).prop_map(|(first, amounts)| {
        amounts
            .into_iter()
            .zip(first..)
            .map(|(amount, index)| BudgetRecord::new(month_at(index).to_string(), amount))
            .collect()
    })
}

fn engine(budgets: Vec<BudgetRecord>) -> ProrationEngine<InMemoryBudgetRepository> {
    ProrationEngine::new(Arc::new(InMemoryBudgetRepository::new(budgets)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_inverted_range_is_zero(
        budgets in budgets(),
        end in 0..DAY_SPAN,
        gap in 1..400u64,
    ) {
        let engine = engine(budgets);
        let end = day_at(end);
        let start = end.checked_add_days(Days::new(gap)).unwrap();

        prop_assert_eq!(engine.total_amount(start, end), Decimal::ZERO);
    }

    #[test]
    fn prop_repeated_calls_agree(
        budgets in budgets(),
        start in 0..DAY_SPAN,
        len in 0..400u64,
    ) {
        let engine = engine(budgets);
        let start = day_at(start);
        let end = start.checked_add_days(Days::new(len)).unwrap();

        let first = engine.total_amount(start, end);
        prop_assert_eq!(engine.total_amount(start, end), first);
        prop_assert_eq!(engine.total_amount(start, end), first);
    }

    #[test]
    fn prop_later_end_never_lowers_total(
        budgets in budgets(),
        start in 0..DAY_SPAN,
        len in 0..400u64,
        extra in 0..400u64,
    ) {
        let engine = engine(budgets);
        let start = day_at(start);
        let end = start.checked_add_days(Days::new(len)).unwrap();
        let wider = end.checked_add_days(Days::new(extra)).unwrap();

        prop_assert!(engine.total_amount(start, wider) >= engine.total_amount(start, end));
    }

    #[test]
    fn prop_earlier_start_never_lowers_total(
        budgets in budgets(),
        start in 400..DAY_SPAN,
        len in 0..400u64,
        extra in 0..400u64,
    ) {
        let engine = engine(budgets);
        let start = day_at(start);
        let end = start.checked_add_days(Days::new(len)).unwrap();
        let wider = start.checked_sub_days(Days::new(extra)).unwrap();

        prop_assert!(engine.total_amount(wider, end) >= engine.total_amount(start, end));
    }

    #[test]
    fn prop_repository_order_is_irrelevant(
        budgets in budgets(),
        start in 0..DAY_SPAN,
        len in 0..400u64,
    ) {
        let start = day_at(start);
        let end = start.checked_add_days(Days::new(len)).unwrap();

        let mut reversed = budgets.clone();
        reversed.reverse();

        prop_assert_eq!(
            engine(budgets).total_amount(start, end),
            engine(reversed).total_amount(start, end)
        );
    }

    #[test]
    fn prop_whole_months_are_exact(
        first in 0..MONTH_SPAN,
        amounts in prop::collection::vec(amount(), 1..24),
        skip in 0..24usize,
        take in 1..12usize,
    ) {
        let budgets: Vec<BudgetRecord> = amounts
            .iter()
            .zip(first..)
            .map(|(amount, index)| BudgetRecord::new(month_at(index).to_string(), *amount))
            .collect();
        let skip = skip % budgets.len();
        let covered = &budgets[skip..budgets.len().min(skip + take)];
        let expected: Decimal = covered.iter().map(|record| record.amount).sum();
        let first_month = covered[0].year_month().unwrap();
        let last_month = covered[covered.len() - 1].year_month().unwrap();

        let engine = engine(budgets);
        prop_assert_eq!(
            engine.total_amount(first_month.first_day(), last_month.last_day()),
            expected
        );
    }

    #[test]
    fn prop_breakdown_sums_to_total(
        budgets in budgets(),
        start in 0..DAY_SPAN,
        len in 0..400u64,
    ) {
        let engine = engine(budgets);
        let start = day_at(start);
        let end = start.checked_add_days(Days::new(len)).unwrap();

        let breakdown = engine.breakdown(start, end);
        let days: i64 = breakdown.iter().map(|c| c.days).sum();
        let sum: Decimal = breakdown.iter().map(|c| c.amount).sum();

        prop_assert!(days <= end.signed_duration_since(start).num_days() + 1);
        prop_assert_eq!(sum, engine.total_amount(start, end));
        prop_assert!(breakdown.windows(2).all(|pair| pair[0].period < pair[1].period));
    }
}
