//! Household-level figures derived from debt and savings snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::model::{Debt, SavingsAccount};

/// Savings against debts, with debts at their adjusted balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPosition {
    pub total_savings: Decimal,
    pub total_debt: Decimal,
    /// `total_savings - total_debt`; negative when debts outweigh savings.
    pub net: Decimal,
}

pub fn net_position(debts: &[Debt], savings: &[SavingsAccount], clock: &dyn Clock) -> NetPosition {
    let total_savings: Decimal = savings.iter().map(|account| account.balance).sum();
    let total_debt: Decimal = debts
        .iter()
        .map(|debt| debt.adjusted_balance(clock).adjusted_balance)
        .sum();

    NetPosition {
        total_savings,
        total_debt,
        net: total_savings - total_debt,
    }
}

/// How many months `liquid_savings` covers `monthly_outgoings`, to two
/// decimal places. `None` when there are no outgoings to cover.
pub fn runway_months(liquid_savings: Decimal, monthly_outgoings: Decimal) -> Option<Decimal> {
    if monthly_outgoings <= Decimal::ZERO {
        return None;
    }
    Some((liquid_savings.max(Decimal::ZERO) / monthly_outgoings).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::tests::{card, date};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn pot(balance: Decimal) -> SavingsAccount {
        SavingsAccount {
            name: "Pot".to_string(),
            balance,
            aer: dec!(4),
        }
    }

    #[test]
    fn net_position_uses_adjusted_debt() {
        let clock = FixedClock::on(date(2024, 4, 20));
        let position = net_position(&[card()], &[pot(dec!(1000)), pot(dec!(500))], &clock);

        assert_eq!(position.total_savings, dec!(1500));
        assert_eq!(position.total_debt, dec!(1050));
        assert_eq!(position.net, dec!(450));
    }

    #[test]
    fn empty_household_is_zero() {
        let clock = FixedClock::on(date(2024, 4, 20));
        let position = net_position(&[], &[], &clock);
        assert_eq!(position.net, Decimal::ZERO);
    }

    #[rstest]
    #[case(dec!(6000), dec!(2000), Some(dec!(3)))]
    #[case(dec!(1000), dec!(3000), Some(dec!(0.33)))]
    #[case(dec!(-50), dec!(100), Some(dec!(0)))]
    #[case(dec!(1000), dec!(0), None)]
    fn runway(#[case] savings: Decimal, #[case] outgoings: Decimal, #[case] expected: Option<Decimal>) {
        assert_eq!(runway_months(savings, outgoings), expected);
    }
}
