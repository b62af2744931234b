//! Monthly compounding projections for savings balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rate::RateConvention;

/// One projected month of savings growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRow {
    /// 1-based month number.
    pub month_index: u32,
    /// The balance after this month's interest is added.
    pub balance_after: Decimal,
    /// The interest earned this month.
    pub interest_this_month: Decimal,
}

/// Totals of a consumed [`SavingsProjection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// The number of months projected.
    pub months: u32,
    /// The balance after the last month.
    pub final_balance: Decimal,
    /// The interest earned across all months.
    pub total_interest: Decimal,
}

/// Lazy, fixed-length growth projection produced by [`project_savings_growth`].
#[derive(Debug, Clone)]
pub struct SavingsProjection {
    balance: Decimal,
    aer_percent: Decimal,
    monthly_rate: Decimal,
    months: u32,
    emitted: u32,
}

/// Projects `starting_balance` compounding monthly at `aer_percent` for
/// `months` months. Always yields exactly `months` rows.
///
/// Balances too large for [`Decimal`] saturate at [`Decimal::MAX`] rather than
/// ending the projection early.
pub fn project_savings_growth(starting_balance: Decimal, aer_percent: Decimal, months: u32) -> SavingsProjection {
    SavingsProjection {
        balance: starting_balance,
        aer_percent,
        monthly_rate: RateConvention::Nominal.monthly_rate(aer_percent),
        months,
        emitted: 0,
    }
}

impl SavingsProjection {
    /// Recomputes the monthly rate under `convention`.
    pub fn with_convention(mut self, convention: RateConvention) -> Self {
        self.monthly_rate = convention.monthly_rate(self.aer_percent);
        self
    }

    pub fn summarize(self) -> GrowthSummary {
        let starting_balance = self.balance;
        let months = self.months;
        let (final_balance, total_interest) = self.fold(
            (starting_balance, Decimal::ZERO),
            |(_, interest), row| (row.balance_after, saturating_sum(interest, row.interest_this_month)),
        );
        GrowthSummary {
            months,
            final_balance,
            total_interest,
        }
    }
}

impl Iterator for SavingsProjection {
    type Item = SavingsRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.months {
            return None;
        }
        let interest = self
            .balance
            .checked_mul(self.monthly_rate)
            .unwrap_or(Decimal::MAX);
        self.balance = saturating_sum(self.balance, interest);
        self.emitted += 1;

        Some(SavingsRow {
            month_index: self.emitted,
            balance_after: self.balance,
            interest_this_month: interest,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.months - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SavingsProjection {}

impl std::iter::FusedIterator for SavingsProjection {}

fn saturating_sum(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}
