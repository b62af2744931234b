//! Read-only snapshots of the debt and savings records the projections consume.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::{BalanceAdjustment, adjust_balance};
use crate::clock::Clock;
use crate::error::{ValidationError, non_negative};

/// A debt as stored by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    /// Recorded principal. May be stale if payments were not entered.
    pub balance: Decimal,
    pub starting_balance: Decimal,
    /// Annual percentage rate, e.g. `19.9`.
    pub apr: Decimal,
    pub minimum_payment: Decimal,
    /// Overrides `minimum_payment` when the user pays more.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_payment: Option<Decimal>,
    /// Day of month the payment is taken, 1-31.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_day: Option<u32>,
    #[serde(default)]
    pub is_promo_0: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Debt {
    /// The amount paid each month: the planned payment if set, else the minimum.
    pub fn monthly_payment(&self) -> Decimal {
        self.planned_payment.unwrap_or(self.minimum_payment)
    }

    /// The 0% promotion window, if the debt carries one.
    pub fn promo_window(&self) -> Option<PromoWindow> {
        self.is_promo_0.then_some(PromoWindow {
            start: self.promo_start_date,
            end: self.promo_end_date,
        })
    }

    /// Whether a 0% promotion covers `date`.
    pub fn promo_active_on(&self, date: NaiveDate) -> bool {
        self.promo_window().is_some_and(|window| window.covers(date))
    }

    /// The APR in force on `date`.
    pub fn apr_on(&self, date: NaiveDate) -> Decimal {
        if self.promo_active_on(date) {
            Decimal::ZERO
        } else {
            self.apr
        }
    }

    /// Share of the starting balance already repaid, in `[0, 1]`.
    pub fn progress(&self) -> Option<Decimal> {
        if self.starting_balance <= Decimal::ZERO {
            return None;
        }
        let repaid = (self.starting_balance - self.balance) / self.starting_balance;
        Some(repaid.clamp(Decimal::ZERO, Decimal::ONE))
    }

    /// Estimates the current balance, assuming payments kept being taken since
    /// the record was created.
    pub fn adjusted_balance(&self, clock: &dyn Clock) -> BalanceAdjustment {
        adjust_balance(
            self.balance,
            self.payment_day,
            self.monthly_payment(),
            self.created_at,
            clock,
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("balance", self.balance)?;
        non_negative("starting_balance", self.starting_balance)?;
        non_negative("apr", self.apr)?;
        non_negative("minimum_payment", self.minimum_payment)?;
        if let Some(planned) = self.planned_payment {
            non_negative("planned_payment", planned)?;
        }
        if let Some(day) = self.payment_day {
            if !(1..=31).contains(&day) {
                return Err(ValidationError::PaymentDayOutOfRange(day));
            }
        }
        if let (Some(start), Some(end)) = (self.promo_start_date, self.promo_end_date) {
            if end < start {
                return Err(ValidationError::PromoWindowInverted { start, end });
            }
        }
        Ok(())
    }
}

/// Dates during which a debt accrues no interest. Missing bounds are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl PromoWindow {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| start <= date) && self.end.is_none_or(|end| date <= end)
    }
}

/// A savings account as stored by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub name: String,
    pub balance: Decimal,
    /// Annual equivalent rate, e.g. `4.5`.
    pub aer: Decimal,
}

impl SavingsAccount {
    pub fn validate(&self) -> Result<(), ValidationError> {
        non_negative("balance", self.balance)?;
        non_negative("aer", self.aer)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use rust_decimal_macros::dec;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn card() -> Debt {
        Debt {
            name: "Credit card".to_string(),
            balance: dec!(1200),
            starting_balance: dec!(2000),
            apr: dec!(24),
            minimum_payment: dec!(50),
            planned_payment: None,
            payment_day: Some(15),
            is_promo_0: false,
            promo_start_date: None,
            promo_end_date: None,
            created_at: date(2024, 1, 20).and_hms_opt(9, 30, 0).unwrap().and_utc(),
        }
    }

    #[test]
    fn planned_payment_overrides_minimum() {
        let mut debt = card();
        assert_eq!(debt.monthly_payment(), dec!(50));
        debt.planned_payment = Some(dec!(120));
        assert_eq!(debt.monthly_payment(), dec!(120));
    }

    #[test]
    fn promo_zeroes_apr_inside_window() {
        let mut debt = card();
        debt.is_promo_0 = true;
        debt.promo_start_date = Some(date(2024, 1, 1));
        debt.promo_end_date = Some(date(2024, 6, 30));

        assert_eq!(debt.apr_on(date(2024, 3, 1)), Decimal::ZERO);
        assert_eq!(debt.apr_on(date(2024, 6, 30)), Decimal::ZERO);
        assert_eq!(debt.apr_on(date(2024, 7, 1)), dec!(24));
        assert_eq!(debt.apr_on(date(2023, 12, 31)), dec!(24));
        assert!(card().promo_window().is_none());
    }

    #[test]
    fn promo_flag_without_dates_is_open_ended() {
        let mut debt = card();
        debt.is_promo_0 = true;
        assert_eq!(debt.apr_on(date(2030, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn progress_is_share_repaid() {
        assert_eq!(card().progress(), Some(dec!(0.4)));

        let mut grown = card();
        grown.balance = dec!(2500);
        assert_eq!(grown.progress(), Some(Decimal::ZERO));

        grown.starting_balance = Decimal::ZERO;
        assert_eq!(grown.progress(), None);
    }

    #[test]
    fn adjusted_balance_uses_monthly_payment() {
        let debt = card();
        let adjustment = debt.adjusted_balance(&FixedClock::on(date(2024, 4, 20)));
        assert_eq!(adjustment.payments_made, 3);
        assert_eq!(adjustment.adjusted_balance, dec!(1050));
    }

    #[test]
    fn validation_rejects_bad_snapshots() {
        let mut debt = card();
        assert!(debt.validate().is_ok());

        debt.payment_day = Some(32);
        assert_eq!(debt.validate(), Err(ValidationError::PaymentDayOutOfRange(32)));

        debt = card();
        debt.balance = dec!(-1);
        assert!(matches!(
            debt.validate(),
            Err(ValidationError::Negative { field: "balance", .. })
        ));

        debt = card();
        debt.promo_start_date = Some(date(2024, 5, 1));
        debt.promo_end_date = Some(date(2024, 4, 1));
        assert!(matches!(debt.validate(), Err(ValidationError::PromoWindowInverted { .. })));

        let savings = SavingsAccount {
            name: "Rainy day".to_string(),
            balance: dec!(100),
            aer: dec!(-0.5),
        };
        assert!(matches!(
            savings.validate(),
            Err(ValidationError::Negative { field: "aer", .. })
        ));
    }

    #[test]
    fn debt_deserializes_with_optional_fields_missing() {
        let json = r#"{
            "name": "Car loan",
            "balance": "8000",
            "starting_balance": "12000",
            "apr": "6.9",
            "minimum_payment": "250",
            "created_at": "2024-02-01T00:00:00Z"
        }"#;
        let debt: Debt = serde_json::from_str(json).unwrap();
        assert_eq!(debt.payment_day, None);
        assert!(!debt.is_promo_0);
        assert_eq!(debt.monthly_payment(), dec!(250));
    }
}
