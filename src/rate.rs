//! Conversions from annual percentage rates to per-month factors.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// How an annual percentage is spread over twelve monthly periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateConvention {
    /// `annual / 100 / 12`. Used for APR on debts and, by default, for AER.
    #[default]
    Nominal,
    /// `(1 + annual / 100)^(1/12) - 1`, so twelve compounded months reproduce
    /// the annual rate exactly.
    Effective,
}

impl RateConvention {
    /// Monthly decimal factor (not a percentage) for `annual_percent`.
    pub fn monthly_rate(self, annual_percent: Decimal) -> Decimal {
        match self {
            RateConvention::Nominal => nominal_monthly_rate(annual_percent),
            RateConvention::Effective => effective_monthly_rate(annual_percent),
        }
    }
}

/// Converts an annual percentage such as `24` into `0.02` per month.
pub fn nominal_monthly_rate(annual_percent: Decimal) -> Decimal {
    annual_percent / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}

/// Converts an annual percentage to the monthly rate that compounds to it.
///
/// 12% per year gives roughly 0.9488% per month rather than the nominal 1%.
pub fn effective_monthly_rate(annual_percent: Decimal) -> Decimal {
    if annual_percent.is_zero() {
        return Decimal::ZERO;
    }
    let base = Decimal::ONE + annual_percent / Decimal::ONE_HUNDRED;
    let exponent = Decimal::ONE / MONTHS_PER_YEAR;

    base.powd(exponent) - Decimal::ONE
}
