use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a debt or savings snapshot is unfit for projection.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: Decimal },

    #[error("Payment day must be between 1 and 31 (got {0})")]
    PaymentDayOutOfRange(u32),

    #[error("Promotion ends on {end} before it starts on {start}")]
    PromoWindowInverted { start: NaiveDate, end: NaiveDate },
}

pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}
