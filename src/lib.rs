//! `finance_projection` turns household debt and savings records into
//! display-only projections.
//!
//! It provides three pure calculations:
//! - **Balance adjustment**: estimates a debt's real balance by deducting the
//!   monthly payments assumed to have been taken since the record was created.
//! - **Amortization**: a month-by-month payoff schedule for a level monthly
//!   payment with interest compounding monthly at `APR / 12`.
//! - **Savings growth**: a month-by-month compounding projection at `AER / 12`.
//!
//! Nothing here performs I/O or keeps state between calls; the same inputs
//! always give the same rows. Amounts are [`rust_decimal::Decimal`].
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use finance_projection::{PayoffOutlook, project_amortization, project_savings_growth};
//! use rust_decimal_macros::dec;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let payoff = project_amortization(dec!(1200), dec!(0), dec!(100), start, 24).summarize();
//! assert_eq!(payoff.months, 12);
//! assert_eq!(
//!     payoff.outlook,
//!     PayoffOutlook::PaidOff { date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap() }
//! );
//!
//! let growth = project_savings_growth(dec!(10000), dec!(5), 12).summarize();
//! assert_eq!(growth.final_balance.round_dp(2), dec!(10511.62));
//! ```

pub mod amortization;
pub mod balance;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod rate;
pub mod savings;
pub mod summary;
pub mod telemetry;

pub use amortization::{
    AmortizationRow, AmortizationSchedule, DEFAULT_HORIZON_MONTHS, MAX_PROJECTION_MONTHS,
    PayoffOutlook, PayoffSummary, payment_to_clear, project_amortization, project_debt,
};
pub use balance::{BalanceAdjustment, adjust_balance, adjust_balance_as_of};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{HouseholdMember, ProjectionConfig};
pub use error::ValidationError;
pub use model::{Debt, PromoWindow, SavingsAccount};
pub use rate::RateConvention;
pub use savings::{GrowthSummary, SavingsProjection, SavingsRow, project_savings_growth};
pub use summary::{NetPosition, net_position, runway_months};
pub use telemetry::init_tracing;
