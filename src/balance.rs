//! Estimating a debt's real balance when payments have not been recorded.
//!
//! A debt's stored balance is whatever the user typed when creating it. Lenders
//! keep taking the payment on the same day every month, so the adjuster counts
//! the payment days that have passed since creation and deducts one payment
//! for each.
//!
//! Counting convention: a payment day is counted when it falls strictly after
//! the creation date and on or before today. A record created on its own
//! payment day is assumed to already reflect that day's payment.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calendar::payment_days_between;
use crate::clock::Clock;

/// Outcome of [`adjust_balance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceAdjustment {
    /// Recorded balance minus the assumed payments, never below zero.
    pub adjusted_balance: Decimal,
    /// Payment days elapsed since the record was created.
    pub payments_made: u32,
}

impl BalanceAdjustment {
    fn unchanged(balance: Decimal) -> Self {
        Self {
            adjusted_balance: balance,
            payments_made: 0,
        }
    }
}

/// Adjusts `recorded_balance` for payments assumed to have been taken between
/// `created_at` and the clock's current date.
pub fn adjust_balance(
    recorded_balance: Decimal,
    payment_day: Option<u32>,
    monthly_payment: Decimal,
    created_at: DateTime<Utc>,
    clock: &dyn Clock,
) -> BalanceAdjustment {
    adjust_balance_as_of(
        recorded_balance,
        payment_day,
        monthly_payment,
        created_at,
        clock.today(),
    )
}

/// [`adjust_balance`] with an explicit "today".
pub fn adjust_balance_as_of(
    recorded_balance: Decimal,
    payment_day: Option<u32>,
    monthly_payment: Decimal,
    created_at: DateTime<Utc>,
    today: NaiveDate,
) -> BalanceAdjustment {
    let Some(day) = payment_day.filter(|day| (1..=31).contains(day)) else {
        trace!(?payment_day, "no usable payment day, balance left as recorded");
        return BalanceAdjustment::unchanged(recorded_balance);
    };
    if monthly_payment <= Decimal::ZERO {
        trace!(%monthly_payment, "no positive payment, balance left as recorded");
        return BalanceAdjustment::unchanged(recorded_balance);
    }

    let payments_made = payment_days_between(day, created_at.date_naive(), today);
    let deducted = monthly_payment * Decimal::from(payments_made);
    let adjusted_balance = (recorded_balance - deducted).max(Decimal::ZERO);
    trace!(payments_made, %adjusted_balance, "balance adjusted for elapsed payment days");

    BalanceAdjustment {
        adjusted_balance,
        payments_made,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn created(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        date(y, m, d).and_hms_opt(18, 45, 0).unwrap().and_utc()
    }

    #[test]
    fn three_elapsed_payment_days_deduct_three_payments() {
        let result = adjust_balance(
            dec!(500),
            Some(15),
            dec!(100),
            created(2024, 1, 20),
            &FixedClock::on(date(2024, 4, 20)),
        );
        assert_eq!(result.payments_made, 3);
        assert_eq!(result.adjusted_balance, dec!(200));
    }

    #[rstest]
    #[case(None, dec!(100))]
    #[case(Some(15), dec!(0))]
    #[case(Some(15), dec!(-25))]
    #[case(Some(0), dec!(100))]
    #[case(Some(40), dec!(100))]
    fn missing_inputs_pass_balance_through(#[case] day: Option<u32>, #[case] payment: Decimal) {
        let result = adjust_balance_as_of(dec!(750), day, payment, created(2023, 1, 1), date(2024, 6, 1));
        assert_eq!(result, BalanceAdjustment::unchanged(dec!(750)));
    }

    #[test]
    fn balance_is_floored_at_zero() {
        let result = adjust_balance_as_of(dec!(250), Some(1), dec!(100), created(2024, 1, 15), date(2024, 12, 31));
        assert_eq!(result.payments_made, 11);
        assert_eq!(result.adjusted_balance, Decimal::ZERO);
    }

    #[test]
    fn zero_balance_stays_zero() {
        let result = adjust_balance_as_of(Decimal::ZERO, Some(10), dec!(30), created(2024, 1, 1), date(2024, 3, 11));
        assert_eq!(result.payments_made, 3);
        assert_eq!(result.adjusted_balance, Decimal::ZERO);
    }

    #[test]
    fn creation_day_is_not_a_payment_but_today_is() {
        let result = adjust_balance_as_of(dec!(1000), Some(15), dec!(100), created(2024, 3, 15), date(2024, 4, 15));
        assert_eq!(result.payments_made, 1);
        assert_eq!(result.adjusted_balance, dec!(900));
    }

    #[test]
    fn future_creation_counts_nothing() {
        let result = adjust_balance_as_of(dec!(1000), Some(15), dec!(100), created(2025, 1, 1), date(2024, 6, 1));
        assert_eq!(result, BalanceAdjustment::unchanged(dec!(1000)));
    }
}
