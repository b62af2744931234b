//! Month arithmetic for monthly payment schedules.

use chrono::{Datelike, Duration, NaiveDate};

/// Shifts `date` by `months` calendar months, clamping the day to the target
/// month's length (Jan 31 + 1 month is Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.month0() + months;
    let year = date.year() + (total / 12) as i32;
    let month = total % 12 + 1;

    on_day(year, month, date.day())
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}

/// The date `day` falls on in the given month, clamped to the month's last day.
pub fn on_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let clamped = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, clamped)
        .unwrap_or(NaiveDate::MIN)
}

/// Counts the monthly occurrences of `payment_day` that fall in
/// `(after, until]`: the start date is excluded, the end date included.
pub fn payment_days_between(payment_day: u32, after: NaiveDate, until: NaiveDate) -> u32 {
    if until <= after {
        return 0;
    }

    let mut count = 0;
    let mut year = after.year();
    let mut month = after.month();
    loop {
        let due = on_day(year, month, payment_day);
        if due > until {
            break;
        }
        if due > after {
            count += 1;
        }
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }
    count
}

/// First occurrence of `payment_day` on or after `from`.
pub fn next_payment_date(payment_day: u32, from: NaiveDate) -> NaiveDate {
    let this_month = on_day(from.year(), from.month(), payment_day);
    if this_month >= from {
        return this_month;
    }
    let next = add_months(on_day(from.year(), from.month(), 1), 1);
    on_day(next.year(), next.month(), payment_day)
}
