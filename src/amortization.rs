//! Month-by-month payoff schedules for debts paid with a level monthly amount.

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{add_months, next_payment_date};
use crate::clock::Clock;
use crate::model::{Debt, PromoWindow};
use crate::rate::nominal_monthly_rate;

/// Hard ceiling on schedule length, whatever the caller asks for.
pub const MAX_PROJECTION_MONTHS: u32 = 600;

/// Schedule length used when the caller has no preference. Schedules that
/// run this long without clearing are shown as "240+ months".
pub const DEFAULT_HORIZON_MONTHS: u32 = 240;

/// Represents the payment details for a single month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based position in the schedule.
    pub month: u32,
    /// The date the payment is taken.
    pub date: NaiveDate,
    /// Amount paid this month. Only the final payment can be below the level amount.
    pub payment_amount: Decimal,
    /// Interest charged on the balance this month.
    pub interest_amount: Decimal,
    /// Portion of the payment that reduced the balance. Negative when the
    /// payment does not cover the month's interest.
    pub principal_amount: Decimal,
    /// The remaining balance of the debt after the payment.
    pub balance_after: Decimal,
}

/// How a schedule ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayoffOutlook {
    /// Nothing left to pay at the start.
    AlreadyPaidOff,
    /// No positive monthly payment, so no schedule exists.
    NoPayment,
    /// The last payment lands on `date`.
    PaidOff { date: NaiveDate },
    /// Still owing after the last projected month.
    BeyondHorizon,
}

/// Totals of a consumed [`AmortizationSchedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSummary {
    /// The number of rows in the schedule.
    pub months: u32,
    /// The total amount paid over the schedule.
    pub total_paid: Decimal,
    /// The portion of `total_paid` that went to interest.
    pub total_interest: Decimal,
    /// The balance left after the last row.
    pub final_balance: Decimal,
    /// Whether and when the debt is cleared.
    pub outlook: PayoffOutlook,
}

/// Lazy payoff schedule produced by [`project_amortization`].
///
/// Each call to `next` applies one month of interest and one payment. The
/// iterator ends once the balance reaches zero or the month limit is hit, and
/// is not restartable: project again to start over. A balance that grows past
/// what [`Decimal`] can hold also ends the schedule, which then summarizes as
/// [`PayoffOutlook::BeyondHorizon`].
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    balance: Decimal,
    monthly_rate: Decimal,
    monthly_payment: Decimal,
    start_date: NaiveDate,
    max_months: u32,
    emitted: u32,
    promo: Option<PromoWindow>,
    empty_reason: Option<PayoffOutlook>,
    overflowed: bool,
}

/// Projects the payoff of `starting_balance` at `apr_percent`, paying
/// `monthly_payment` every month from `start_date`.
///
/// `max_months` is capped at [`MAX_PROJECTION_MONTHS`]. A non-positive balance
/// or payment yields an empty schedule.
pub fn project_amortization(
    starting_balance: Decimal,
    apr_percent: Decimal,
    monthly_payment: Decimal,
    start_date: NaiveDate,
    max_months: u32,
) -> AmortizationSchedule {
    if max_months > MAX_PROJECTION_MONTHS {
        debug!(max_months, cap = MAX_PROJECTION_MONTHS, "projection length capped");
    }
    let monthly_rate = nominal_monthly_rate(apr_percent);
    let empty_reason = if starting_balance <= Decimal::ZERO {
        Some(PayoffOutlook::AlreadyPaidOff)
    } else if monthly_payment <= Decimal::ZERO {
        Some(PayoffOutlook::NoPayment)
    } else {
        None
    };
    if empty_reason.is_none()
        && starting_balance
            .checked_mul(monthly_rate)
            .is_none_or(|interest| monthly_payment <= interest)
    {
        debug!(%monthly_payment, %starting_balance, "payment does not cover monthly interest");
    }

    AmortizationSchedule {
        balance: starting_balance.max(Decimal::ZERO),
        monthly_rate,
        monthly_payment,
        start_date,
        max_months: max_months.min(MAX_PROJECTION_MONTHS),
        emitted: 0,
        promo: None,
        empty_reason,
        overflowed: false,
    }
}

/// Projects a debt's payoff from today.
///
/// The starting balance is the adjusted balance (see [`Debt::adjusted_balance`]),
/// the first row falls on the next payment day on or after today, and a 0%
/// promotion applies for the dates it covers.
pub fn project_debt(debt: &Debt, clock: &dyn Clock, max_months: u32) -> AmortizationSchedule {
    let today = clock.today();
    let adjustment = debt.adjusted_balance(clock);
    let first_payment = debt
        .payment_day
        .map_or(today, |day| next_payment_date(day, today));

    let schedule = project_amortization(
        adjustment.adjusted_balance,
        debt.apr,
        debt.monthly_payment(),
        first_payment,
        max_months,
    );
    match debt.promo_window() {
        Some(window) => schedule.with_promo(window),
        None => schedule,
    }
}

/// Level monthly payment that clears `balance` in exactly `months` payments at
/// `apr_percent`, rounded up to the cent.
///
/// Uses PMT = P * [i(1 + i)^n] / [(1 + i)^n - 1] with the nominal monthly rate.
/// Returns `None` when `months` is zero or the growth factor is too large for
/// [`Decimal`].
pub fn payment_to_clear(balance: Decimal, apr_percent: Decimal, months: u32) -> Option<Decimal> {
    if months == 0 {
        return None;
    }
    if balance <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let monthly_rate = nominal_monthly_rate(apr_percent);
    let payment = if monthly_rate.is_zero() {
        balance / Decimal::from(months)
    } else {
        let growth = (Decimal::ONE + monthly_rate).checked_powu(months.into())?;
        balance
            .checked_mul(monthly_rate.checked_mul(growth)?)?
            .checked_div(growth - Decimal::ONE)?
    };

    Some(payment.round_dp_with_strategy(2, RoundingStrategy::AwayFromZero))
}

impl AmortizationSchedule {
    /// Charges no interest in months whose payment date falls inside `window`.
    pub fn with_promo(mut self, window: PromoWindow) -> Self {
        self.promo = Some(window);
        self
    }

    /// Consumes the schedule and totals it.
    pub fn summarize(self) -> PayoffSummary {
        let empty_reason = self.empty_reason;
        let mut summary = PayoffSummary {
            months: 0,
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            final_balance: self.balance,
            outlook: PayoffOutlook::BeyondHorizon,
        };
        let mut last_date = None;

        for row in self {
            summary.months = row.month;
            summary.total_paid = saturating_sum(summary.total_paid, row.payment_amount);
            summary.total_interest = saturating_sum(summary.total_interest, row.interest_amount);
            summary.final_balance = row.balance_after;
            last_date = Some(row.date);
        }

        summary.outlook = match (empty_reason, last_date) {
            (Some(reason), _) => reason,
            (None, Some(date)) if summary.final_balance.is_zero() => PayoffOutlook::PaidOff { date },
            _ => PayoffOutlook::BeyondHorizon,
        };
        summary
    }

    fn rate_on(&self, date: NaiveDate) -> Decimal {
        match self.promo {
            Some(window) if window.covers(date) => Decimal::ZERO,
            _ => self.monthly_rate,
        }
    }
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.empty_reason.is_some()
            || self.overflowed
            || self.emitted >= self.max_months
            || self.balance.is_zero()
        {
            return None;
        }

        let date = add_months(self.start_date, self.emitted);
        let Some((interest, owed)) = self
            .balance
            .checked_mul(self.rate_on(date))
            .and_then(|interest| Some((interest, self.balance.checked_add(interest)?)))
        else {
            debug!(month = self.emitted + 1, balance = %self.balance, "balance outgrew decimal range, schedule ended");
            self.overflowed = true;
            return None;
        };
        let payment = self.monthly_payment.min(owed);
        self.balance = (owed - payment).max(Decimal::ZERO);
        self.emitted += 1;

        Some(AmortizationRow {
            month: self.emitted,
            date,
            payment_amount: payment,
            interest_amount: interest,
            principal_amount: payment - interest,
            balance_after: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.empty_reason.is_some() || self.overflowed || self.balance.is_zero() {
            return (0, Some(0));
        }
        (0, Some((self.max_months - self.emitted) as usize))
    }
}

impl std::iter::FusedIterator for AmortizationSchedule {}

fn saturating_sum(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}
