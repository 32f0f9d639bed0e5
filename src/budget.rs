//! The daily budget computation.
//!
//! The month's income is spread evenly over every day of the month. By the selected day, that
//! many days' worth of allowance has accrued, and every expense recorded in the month up to and
//! including the selected day has already been taken out of it.

use crate::date;
use crate::model::{Amount, Transactions};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// The intermediate figures behind the "remaining today" value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    /// The month's total income divided by the number of days in the month.
    pub daily_allowance: f64,
    /// `daily_allowance` multiplied by the selected day of the month.
    pub accrued_allowance: f64,
    /// The sum of the month's expenses up to and including the selected day. Never positive.
    pub spent_so_far: f64,
    /// `accrued_allowance + spent_so_far`.
    pub remaining: f64,
}

/// Computes every figure of the budget for `selected`.
pub fn breakdown(transactions: &Transactions, selected: NaiveDate) -> Breakdown {
    let income: Amount = transactions
        .in_month(selected)
        .map(|t| t.sum())
        .filter(Amount::is_positive)
        .sum();
    let daily_allowance = income.value() / f64::from(date::days_in_month(selected));

    let spent: Amount = transactions
        .in_month(selected)
        .filter(|t| date::compare(t.date(), selected).is_le())
        .map(|t| t.sum())
        .filter(Amount::is_negative)
        .sum();
    let spent_so_far = spent.value();

    let accrued_allowance = f64::from(selected.day()) * daily_allowance;

    debug!(daily_allowance, spent_so_far, accrued_allowance, "Computed budget for {selected}");

    Breakdown {
        daily_allowance,
        accrued_allowance,
        spent_so_far,
        remaining: accrued_allowance + spent_so_far,
    }
}

/// How much can still be spent on `selected`.
pub fn remaining_today(transactions: &Transactions, selected: NaiveDate) -> f64 {
    breakdown(transactions, selected).remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transaction;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(day: NaiveDate, sum: f64) -> Transaction {
        Transaction::new(day, "", Amount::new(sum))
    }

    // June 2023 has 30 days
    fn salary() -> Transactions {
        Transactions::from(vec![t(d(2023, 6, 1), 3000.0)])
    }

    #[test]
    fn test_income_accrues_by_day() {
        let b = breakdown(&salary(), d(2023, 6, 10));
        assert_eq!(b.daily_allowance, 100.0);
        assert_eq!(b.accrued_allowance, 1000.0);
        assert_eq!(b.spent_so_far, 0.0);
        assert_eq!(b.remaining, 1000.0);
    }

    #[test]
    fn test_expense_is_subtracted() {
        let mut transactions = salary();
        transactions.insert(t(d(2023, 6, 5), -200.0));
        assert_eq!(remaining_today(&transactions, d(2023, 6, 10)), 800.0);
    }

    #[test]
    fn test_no_transactions_in_month() {
        assert_eq!(remaining_today(&Transactions::new(), d(2023, 6, 10)), 0.0);
        let other_month = Transactions::from(vec![t(d(2023, 5, 31), 3000.0), t(d(2023, 7, 1), -5.0)]);
        assert_eq!(remaining_today(&other_month, d(2023, 6, 10)), 0.0);
    }

    #[test]
    fn test_first_day_of_month() {
        assert_eq!(remaining_today(&salary(), d(2023, 6, 1)), 100.0);
    }

    #[test]
    fn test_zero_income_is_just_expenses() {
        let transactions = Transactions::from(vec![t(d(2023, 6, 2), -40.0), t(d(2023, 6, 3), -2.5)]);
        let b = breakdown(&transactions, d(2023, 6, 20));
        assert_eq!(b.daily_allowance, 0.0);
        assert_eq!(b.remaining, -42.5);
    }

    #[test]
    fn test_expense_on_selected_day_counts() {
        let mut transactions = salary();
        transactions.insert(t(d(2023, 6, 10), -30.0));
        assert_eq!(remaining_today(&transactions, d(2023, 6, 10)), 970.0);
    }

    #[test]
    fn test_later_expense_does_not_count_yet() {
        let mut transactions = salary();
        transactions.insert(t(d(2023, 6, 11), -30.0));
        assert_eq!(remaining_today(&transactions, d(2023, 6, 10)), 1000.0);
    }

    #[test]
    fn test_later_income_counts_for_whole_month() {
        let transactions = Transactions::from(vec![t(d(2023, 6, 25), 600.0)]);
        assert_eq!(remaining_today(&transactions, d(2023, 6, 5)), 100.0);
    }

    #[test]
    fn test_allowance_never_decreases_without_expenses() {
        let transactions = Transactions::from(vec![
            t(d(2023, 2, 1), 1000.0),
            t(d(2023, 2, 14), 400.0),
        ]);
        let mut previous = f64::MIN;
        let mut day = d(2023, 2, 1);
        while date::same_month(day, d(2023, 2, 1)) {
            let remaining = remaining_today(&transactions, day);
            assert!(remaining >= previous, "{remaining} < {previous} on {day}");
            previous = remaining;
            day = date::shift(day, 1);
        }
        // The whole income is available on the last day of the month
        assert!((previous - 1400.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_months_are_isolated() {
        let mut transactions = salary();
        transactions.insert(t(d(2023, 6, 5), -200.0));
        let before = remaining_today(&transactions, d(2023, 6, 10));

        transactions.insert(t(d(2023, 5, 30), 10_000.0));
        transactions.insert(t(d(2023, 5, 31), -7_000.0));
        transactions.insert(t(d(2022, 6, 5), -99.0));
        transactions.insert(t(d(2023, 7, 1), 123.0));
        assert_eq!(remaining_today(&transactions, d(2023, 6, 10)), before);
    }

    #[test]
    fn test_nan_amount_is_ignored() {
        let transactions = Transactions::from(vec![t(d(2023, 6, 1), 3000.0), t(d(2023, 6, 2), f64::NAN)]);
        // NaN is neither positive nor negative, so it is filtered out of both sums
        assert_eq!(remaining_today(&transactions, d(2023, 6, 10)), 1000.0);
    }
}
